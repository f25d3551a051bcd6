//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use log::warn;

use uc_core::{ModelId, SimTime};
use uc_model::UrgentCare;
use uc_sim::{ProcessedEvent, RunSummary, SimObserver};

use crate::row::{EventTraceRow, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Event rows buffered before a batch is handed to the writer.
const DEFAULT_BATCH: usize = 4096;

/// A [`SimObserver`] that writes the event trace and one summary row per run
/// to any [`OutputWriter`] backend.
///
/// One observer can be passed to several `simulate` calls; every run's rows
/// land in the same files, keyed by model id.  Call [`finish`][Self::finish]
/// once after the last run.
///
/// Errors from the writer are stored because `SimObserver` methods have no
/// return value.  Check them with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    model_id:   u32,
    trace:      bool,
    batch_size: usize,
    pending:    Vec<EventTraceRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            model_id:   ModelId::INVALID.0,
            trace:      true,
            batch_size: DEFAULT_BATCH,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Only write run summaries, not the per-event trace.
    pub fn summaries_only(mut self) -> Self {
        self.trace = false;
        self
    }

    /// Hand event rows to the writer in batches of `n` (at least 1).
    pub fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = n.max(1);
        self
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush buffered rows and close the writer.
    ///
    /// Returns the first error stored during the runs, if any, even when
    /// closing itself succeeds.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush_events();
        let closed = self.writer.finish();
        match self.last_error.take() {
            Some(e) => Err(e),
            None    => closed,
        }
    }

    /// Unwrap the inner writer (e.g. to inspect it after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_events(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_run_start(&mut self, id: ModelId, _horizon: SimTime) {
        self.flush_events();
        self.model_id = id.0;
    }

    fn on_event(&mut self, event: &ProcessedEvent) {
        if !self.trace {
            return;
        }
        self.pending.push(EventTraceRow::from_event(self.model_id, event));
        if self.pending.len() >= self.batch_size {
            self.flush_events();
        }
    }

    fn on_run_end(&mut self, summary: &RunSummary, facility: &UrgentCare) {
        self.flush_events();
        let result = self.writer.write_summary(&RunSummaryRow::new(summary, facility));
        self.store_err(result);
    }
}
