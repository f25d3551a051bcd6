//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventTraceRow, OutputResult, RunSummaryRow};

/// Trait implemented by the CSV, SQLite, and Parquet writers.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] swallows errors from these
/// methods and hands the first one back through `take_error`.
pub trait OutputWriter {
    /// Write a batch of processed events.
    fn write_events(&mut self, rows: &[EventTraceRow]) -> OutputResult<()>;

    /// Write the summary of one finished run.
    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
