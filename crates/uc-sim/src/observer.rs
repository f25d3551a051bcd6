//! Simulation observer trait for progress reporting and data collection.

use uc_core::{ModelId, SimTime};
use uc_model::{EventKind, Outcome, UrgentCare};

use crate::RunSummary;

/// One executed event, as reported to observers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProcessedEvent {
    pub time:    SimTime,
    /// Calendar insertion sequence number.
    pub seq:     u64,
    pub kind:    EventKind,
    pub outcome: Outcome,
}

/// Callbacks invoked by [`UrgentCareModel::simulate`] at key points of a
/// run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — turned-away counter
///
/// ```rust,ignore
/// struct TurnedAway(u64);
///
/// impl SimObserver for TurnedAway {
///     fn on_event(&mut self, ev: &ProcessedEvent) {
///         if matches!(ev.outcome, Outcome::TurnedAway(_)) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
///
/// [`UrgentCareModel::simulate`]: crate::UrgentCareModel::simulate
pub trait SimObserver {
    /// Called after bootstrap, before the first event runs.
    fn on_run_start(&mut self, _id: ModelId, _horizon: SimTime) {}

    /// Called after each event has been processed.
    fn on_event(&mut self, _event: &ProcessedEvent) {}

    /// Called once after the loop stops and statistics are finalised.
    fn on_run_end(&mut self, _summary: &RunSummary, _facility: &UrgentCare) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// A [`SimObserver`] that records every processed event in order.
#[derive(Default, Debug)]
pub struct EventTrace {
    pub events: Vec<ProcessedEvent>,
}

impl EventTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(kind, time in hours)` for every processed event.
    pub fn kinds_and_times(&self) -> Vec<(EventKind, f64)> {
        self.events.iter().map(|e| (e.kind, e.time.hours())).collect()
    }

    /// Times of processed Arrival events.
    pub fn arrival_times(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Arrival)
            .map(|e| e.time.hours())
            .collect()
    }
}

impl SimObserver for EventTrace {
    fn on_run_start(&mut self, _id: ModelId, _horizon: SimTime) {
        self.events.clear();
    }

    fn on_event(&mut self, event: &ProcessedEvent) {
        self.events.push(*event);
    }
}
