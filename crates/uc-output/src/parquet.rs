//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the output directory:
//! - `event_trace.parquet`
//! - `run_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{EventTraceRow, OutputResult, RunSummaryRow};

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("model_id",   DataType::UInt32,  false),
        Field::new("seq",        DataType::UInt64,  false),
        Field::new("time_hours", DataType::Float64, false),
        Field::new("kind",       DataType::Utf8,    false),
        Field::new("outcome",    DataType::Utf8,    false),
        Field::new("patient_id", DataType::UInt32,  true),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("model_id",              DataType::UInt32,  false),
        Field::new("stop_reason",           DataType::Utf8,    false),
        Field::new("horizon_hours",         DataType::Float64, false),
        Field::new("final_time_hours",      DataType::Float64, false),
        Field::new("events_processed",      DataType::UInt64,  false),
        Field::new("admitted",              DataType::UInt64,  false),
        Field::new("turned_away",           DataType::UInt64,  false),
        Field::new("with_depression",       DataType::UInt64,  false),
        Field::new("referrals",             DataType::UInt64,  false),
        Field::new("discharged",            DataType::UInt64,  false),
        Field::new("mean_time_in_system",   DataType::Float64, true),
        Field::new("mean_exam_wait",        DataType::Float64, true),
        Field::new("mean_consult_wait",     DataType::Float64, true),
        Field::new("mean_census",           DataType::Float64, false),
        Field::new("physician_utilization", DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet footers; files written
/// without it cannot be opened by Parquet readers.
pub struct ParquetWriter {
    events:         Option<ArrowWriter<File>>,
    summaries:      Option<ArrowWriter<File>>,
    event_schema:   Arc<Schema>,
    summary_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let event_schema = event_schema();
        let summary_schema = summary_schema();

        let events = ArrowWriter::try_new(
            File::create(dir.join("event_trace.parquet"))?,
            Arc::clone(&event_schema),
            Some(snappy_props()),
        )?;
        let summaries = ArrowWriter::try_new(
            File::create(dir.join("run_summaries.parquet"))?,
            Arc::clone(&summary_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            events: Some(events),
            summaries: Some(summaries),
            event_schema,
            summary_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_events(&mut self, rows: &[EventTraceRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.events.as_mut() else {
            return Ok(());
        };

        let mut model_ids = UInt32Builder::new();
        let mut seqs      = UInt64Builder::new();
        let mut times     = Float64Builder::new();
        let mut kinds     = StringBuilder::new();
        let mut outcomes  = StringBuilder::new();
        let mut patients  = UInt32Builder::new();

        for row in rows {
            model_ids.append_value(row.model_id);
            seqs.append_value(row.seq);
            times.append_value(row.time_hours);
            kinds.append_value(row.kind);
            outcomes.append_value(row.outcome);
            patients.append_option(row.patient_id);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.event_schema),
            vec![
                Arc::new(model_ids.finish()),
                Arc::new(seqs.finish()),
                Arc::new(times.finish()),
                Arc::new(kinds.finish()),
                Arc::new(outcomes.finish()),
                Arc::new(patients.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let u64_col = |v: u64| -> ArrayRef {
            let mut b = UInt64Builder::new();
            b.append_value(v);
            Arc::new(b.finish())
        };
        let f64_col = |v: Option<f64>| -> ArrayRef {
            let mut b = Float64Builder::new();
            b.append_option(v);
            Arc::new(b.finish())
        };
        let str_col = |v: &str| -> ArrayRef {
            let mut b = StringBuilder::new();
            b.append_value(v);
            Arc::new(b.finish())
        };
        let mut model_id = UInt32Builder::new();
        model_id.append_value(row.model_id);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summary_schema),
            vec![
                Arc::new(model_id.finish()),
                str_col(row.stop_reason),
                f64_col(Some(row.horizon_hours)),
                f64_col(Some(row.final_time_hours)),
                u64_col(row.events_processed),
                u64_col(row.admitted),
                u64_col(row.turned_away),
                u64_col(row.with_depression),
                u64_col(row.referrals),
                u64_col(row.discharged),
                f64_col(row.mean_time_in_system),
                f64_col(row.mean_exam_wait),
                f64_col(row.mean_consult_wait),
                f64_col(Some(row.mean_census)),
                f64_col(Some(row.physician_utilization)),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.events.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
