//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `event_trace.csv`
//! - `run_summaries.csv`
//!
//! Missing means and patient ids are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventTraceRow, OutputResult, RunSummaryRow};

pub const EVENT_HEADERS: [&str; 6] =
    ["model_id", "seq", "time_hours", "kind", "outcome", "patient_id"];

pub const SUMMARY_HEADERS: [&str; 15] = [
    "model_id",
    "stop_reason",
    "horizon_hours",
    "final_time_hours",
    "events_processed",
    "admitted",
    "turned_away",
    "with_depression",
    "referrals",
    "discharged",
    "mean_time_in_system",
    "mean_exam_wait",
    "mean_consult_wait",
    "mean_census",
    "physician_utilization",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("event_trace.csv"))?;
        events.write_record(EVENT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("run_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self {
            events,
            summaries,
            finished: false,
        })
    }
}

fn opt(x: Option<f64>) -> String {
    x.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventTraceRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.model_id.to_string(),
                row.seq.to_string(),
                row.time_hours.to_string(),
                row.kind.to_owned(),
                row.outcome.to_owned(),
                row.patient_id.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.model_id.to_string(),
            row.stop_reason.to_owned(),
            row.horizon_hours.to_string(),
            row.final_time_hours.to_string(),
            row.events_processed.to_string(),
            row.admitted.to_string(),
            row.turned_away.to_string(),
            row.with_depression.to_string(),
            row.referrals.to_string(),
            row.discharged.to_string(),
            opt(row.mean_time_in_system),
            opt(row.mean_exam_wait),
            opt(row.mean_consult_wait),
            row.mean_census.to_string(),
            row.physician_utilization.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
