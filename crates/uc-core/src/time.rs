//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous quantity measured in hours since the start of the
//! run.  `SimTime` wraps an `f64` that is guaranteed finite and non-negative,
//! which makes `f64::total_cmp` a valid total order and lets `SimTime` be
//! used directly as a `BTreeMap` key.
//!
//! The only ways to obtain a `SimTime` are [`SimTime::ZERO`],
//! [`SimTime::new`], and [`SimTime::after`], all of which enforce the
//! invariant.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation time, in hours.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Build a time from `hours`.
    ///
    /// Fails with [`CoreError::InvalidTime`] for NaN, infinities, and
    /// negative values.
    pub fn new(hours: f64) -> CoreResult<SimTime> {
        if hours.is_finite() && hours >= 0.0 {
            // Normalise -0.0 so that equal times compare equal under total_cmp.
            Ok(SimTime(hours + 0.0))
        } else {
            Err(CoreError::InvalidTime(hours))
        }
    }

    /// Hours elapsed since time zero.
    #[inline]
    pub fn hours(self) -> f64 {
        self.0
    }

    /// The time `delay` hours after `self`.
    ///
    /// A negative or non-finite `delay` is rejected: events can only be
    /// scheduled forward.
    pub fn after(self, delay: f64) -> CoreResult<SimTime> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(CoreError::InvalidTime(delay));
        }
        SimTime::new(self.0 + delay)
    }

    /// Hours elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for SimTime {
    type Error = CoreError;

    fn try_from(hours: f64) -> CoreResult<SimTime> {
        SimTime::new(hours)
    }
}

impl From<SimTime> for f64 {
    fn from(t: SimTime) -> f64 {
        t.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}h", self.0)
    }
}
