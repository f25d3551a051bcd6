//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the output directory with two tables:
//! `event_trace` and `run_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventTraceRow, OutputResult, RunSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS event_trace (
                 model_id   INTEGER NOT NULL,
                 seq        INTEGER NOT NULL,
                 time_hours REAL    NOT NULL,
                 kind       TEXT    NOT NULL,
                 outcome    TEXT    NOT NULL,
                 patient_id INTEGER,
                 PRIMARY KEY (model_id, seq)
             );
             CREATE TABLE IF NOT EXISTS run_summaries (
                 model_id              INTEGER NOT NULL,
                 stop_reason           TEXT    NOT NULL,
                 horizon_hours         REAL    NOT NULL,
                 final_time_hours      REAL    NOT NULL,
                 events_processed      INTEGER NOT NULL,
                 admitted              INTEGER NOT NULL,
                 turned_away           INTEGER NOT NULL,
                 with_depression       INTEGER NOT NULL,
                 referrals             INTEGER NOT NULL,
                 discharged            INTEGER NOT NULL,
                 mean_time_in_system   REAL,
                 mean_exam_wait        REAL,
                 mean_consult_wait     REAL,
                 mean_census           REAL    NOT NULL,
                 physician_utilization REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventTraceRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO event_trace \
                 (model_id, seq, time_hours, kind, outcome, patient_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.model_id,
                    row.seq as i64,
                    row.time_hours,
                    row.kind,
                    row.outcome,
                    row.patient_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summaries \
             (model_id, stop_reason, horizon_hours, final_time_hours, events_processed, \
              admitted, turned_away, with_depression, referrals, discharged, \
              mean_time_in_system, mean_exam_wait, mean_consult_wait, \
              mean_census, physician_utilization) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            rusqlite::params![
                row.model_id,
                row.stop_reason,
                row.horizon_hours,
                row.final_time_hours,
                row.events_processed as i64,
                row.admitted as i64,
                row.turned_away as i64,
                row.with_depression as i64,
                row.referrals as i64,
                row.discharged as i64,
                row.mean_time_in_system,
                row.mean_exam_wait,
                row.mean_consult_wait,
                row.mean_census,
                row.physician_utilization,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
