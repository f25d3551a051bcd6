//! Facility counters and summary statistics.
//!
//! Two accumulator shapes cover everything the clinic reports:
//!
//! - [`SampleStats`]: one observation per patient (time in system, waits).
//! - [`TimeWeighted`]: a level that changes at event times (census, queue
//!   length, busy physicians); its mean is the area under the step function
//!   divided by the observed span.

use serde::Serialize;

use uc_core::SimTime;

// ── SampleStats ───────────────────────────────────────────────────────────────

/// Running count / mean / standard deviation / min / max of observations.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SampleStats {
    count:  u64,
    sum:    f64,
    sum_sq: f64,
    min:    f64,
    max:    f64,
}

impl SampleStats {
    pub fn record(&mut self, x: f64) {
        if self.count == 0 {
            self.min = x;
            self.max = x;
        } else {
            self.min = self.min.min(x);
            self.max = self.max.max(x);
        }
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Sample standard deviation (n - 1 denominator).  `None` below two
    /// observations.
    pub fn st_dev(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as f64;
        let var = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
        Some(var.max(0.0).sqrt())
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}

// ── TimeWeighted ──────────────────────────────────────────────────────────────

/// Time-average of a piecewise-constant level, observed from time zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TimeWeighted {
    last_time:  SimTime,
    last_value: f64,
    area:       f64,
    max:        f64,
}

impl TimeWeighted {
    /// The level becomes `value` at `now`.
    ///
    /// Calls with `now` earlier than the previous call are ignored.
    pub fn record(&mut self, now: SimTime, value: f64) {
        if now < self.last_time {
            return;
        }
        self.area += self.last_value * now.since(self.last_time);
        self.last_time = now;
        self.last_value = value;
        self.max = self.max.max(value);
    }

    /// Current level.
    pub fn current(&self) -> f64 {
        self.last_value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Average level over `[0, until]`, carrying the current level forward
    /// to `until`.  Returns the current level when `until` is zero.
    pub fn mean(&self, until: SimTime) -> f64 {
        let span = until.hours();
        if span <= 0.0 {
            return self.last_value;
        }
        let tail = (until.since(self.last_time)).max(0.0) * self.last_value;
        (self.area + tail) / span
    }
}

// ── FacilityStats ─────────────────────────────────────────────────────────────

/// Everything the clinic counts during a run.
///
/// Counters are updated by event execution only.  Read them after
/// `UrgentCareModel::simulate` returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FacilityStats {
    /// Patients admitted while the clinic was open.
    pub admitted:           u64,
    /// Arrivals that found the clinic closed.  Not part of any other counter.
    pub turned_away:        u64,
    /// Admitted patients with depression.
    pub with_depression:    u64,
    pub exams_started:      u64,
    pub exams_completed:    u64,
    /// Patients sent on to a mental-health specialist after their exam.
    pub referrals:          u64,
    pub consults_completed: u64,
    pub discharged:         u64,

    /// Admission → discharge, hours.
    pub time_in_system:     SampleStats,
    /// Admission → exam start, hours.
    pub exam_wait:          SampleStats,
    /// Exam end → consult start, hours.
    pub consult_wait:       SampleStats,

    /// Patients inside the clinic (waiting or in service).
    pub census:             TimeWeighted,
    /// Patients in the exam waiting room.
    pub waiting_room:       TimeWeighted,
    /// Physicians currently examining.
    pub busy_physicians:    TimeWeighted,

    /// When `CloseUrgentCare` ran, if it did.
    pub closed_at:          Option<SimTime>,
    /// End of the observation window, set when the run stops.
    pub observed_until:     Option<SimTime>,
}

impl FacilityStats {
    /// Mean census over the observation window (0 before the run ends).
    pub fn mean_census(&self) -> f64 {
        self.observed_until.map_or(0.0, |t| self.census.mean(t))
    }

    /// Mean exam waiting-room length over the observation window.
    pub fn mean_waiting(&self) -> f64 {
        self.observed_until.map_or(0.0, |t| self.waiting_room.mean(t))
    }

    /// Fraction of physician capacity in use, averaged over the window.
    pub fn physician_utilization(&self, n_physicians: u16) -> f64 {
        if n_physicians == 0 {
            return 0.0;
        }
        self.observed_until
            .map_or(0.0, |t| self.busy_physicians.mean(t) / n_physicians as f64)
    }
}
