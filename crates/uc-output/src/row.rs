//! Flat row types written by every backend.

use uc_model::{FacilityStats, UrgentCare};
use uc_sim::{ProcessedEvent, RunSummary};

/// One processed event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTraceRow {
    pub model_id:   u32,
    /// Calendar insertion sequence number; breaks ties between equal times.
    pub seq:        u64,
    pub time_hours: f64,
    pub kind:       &'static str,
    pub outcome:    &'static str,
    /// `None` for events that concern no patient (closing).
    pub patient_id: Option<u32>,
}

impl EventTraceRow {
    pub fn from_event(model_id: u32, ev: &ProcessedEvent) -> Self {
        Self {
            model_id,
            seq:        ev.seq,
            time_hours: ev.time.hours(),
            kind:       ev.kind.as_str(),
            outcome:    ev.outcome.as_str(),
            patient_id: ev.outcome.patient().map(|p| p.0),
        }
    }
}

/// Totals and averages of one finished run.
///
/// The `Option` means are `None` when no patient contributed an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummaryRow {
    pub model_id:              u32,
    pub stop_reason:           &'static str,
    pub horizon_hours:         f64,
    pub final_time_hours:      f64,
    pub events_processed:      u64,
    pub admitted:              u64,
    pub turned_away:           u64,
    pub with_depression:       u64,
    pub referrals:             u64,
    pub discharged:            u64,
    pub mean_time_in_system:   Option<f64>,
    pub mean_exam_wait:        Option<f64>,
    pub mean_consult_wait:     Option<f64>,
    pub mean_census:           f64,
    pub physician_utilization: f64,
}

impl RunSummaryRow {
    pub fn new(summary: &RunSummary, facility: &UrgentCare) -> Self {
        let stats: &FacilityStats = facility.stats();
        Self {
            model_id:              summary.id.0,
            stop_reason:           summary.stop.as_str(),
            horizon_hours:         summary.horizon.hours(),
            final_time_hours:      summary.final_time.hours(),
            events_processed:      summary.events_processed,
            admitted:              stats.admitted,
            turned_away:           stats.turned_away,
            with_depression:       stats.with_depression,
            referrals:             stats.referrals,
            discharged:            stats.discharged,
            mean_time_in_system:   stats.time_in_system.mean(),
            mean_exam_wait:        stats.exam_wait.mean(),
            mean_consult_wait:     stats.consult_wait.mean(),
            mean_census:           stats.mean_census(),
            physician_utilization: stats.physician_utilization(facility.physicians().capacity()),
        }
    }
}
