//! Clinic operating parameters.
//!
//! Typically loaded from a JSON file by the application crate and handed to
//! `UrgentCareModel::new`, which calls [`ClinicParams::validate`] before any
//! event is scheduled.
//!
//! ```json
//! {
//!   "hours_open": 20.0,
//!   "n_physicians": 4,
//!   "n_mental_health_specialists": 2,
//!   "arrival_time_dist":               { "kind": "exponential", "mean": 0.1 },
//!   "exam_time_dist":                  { "kind": "exponential", "mean": 0.25 },
//!   "mental_health_consult_time_dist": { "kind": "exponential", "mean": 0.5 },
//!   "prob_depression": 0.1
//! }
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, SimTime, TimeDist};

/// Everything the facility and its events need to know about the clinic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicParams {
    /// Hours after time zero at which the clinic stops admitting patients.
    pub hours_open: f64,

    /// Physicians examining patients in parallel.  Must be at least 1.
    pub n_physicians: u16,

    /// Mental-health specialists.  0 means depressed patients are discharged
    /// straight after their exam.
    #[serde(default)]
    pub n_mental_health_specialists: u16,

    /// Time between consecutive patient arrivals.
    pub arrival_time_dist: TimeDist,

    /// Duration of a physician exam.
    pub exam_time_dist: TimeDist,

    /// Duration of a mental-health consultation.
    pub mental_health_consult_time_dist: TimeDist,

    /// Probability that an arriving patient has depression.
    pub prob_depression: f64,
}

impl Default for ClinicParams {
    fn default() -> Self {
        Self {
            hours_open:                      20.0,
            n_physicians:                    4,
            n_mental_health_specialists:     2,
            arrival_time_dist:               TimeDist::Exponential { mean: 0.1 },
            exam_time_dist:                  TimeDist::Exponential { mean: 0.25 },
            mental_health_consult_time_dist: TimeDist::Exponential { mean: 0.5 },
            prob_depression:                 0.1,
        }
    }
}

impl ClinicParams {
    /// Parse parameters from any JSON source.  Does not validate.
    pub fn from_json_reader<R: Read>(reader: R) -> CoreResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse parameters from a JSON file.  Does not validate.
    pub fn from_json_path(path: &Path) -> CoreResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Check every field; the first problem found is reported.
    pub fn validate(&self) -> CoreResult<()> {
        self.closing_time()?;

        if !(self.prob_depression.is_finite() && (0.0..=1.0).contains(&self.prob_depression)) {
            return Err(CoreError::InvalidConfiguration(format!(
                "prob_depression must be within [0, 1], got {}",
                self.prob_depression
            )));
        }
        if self.n_physicians == 0 {
            return Err(CoreError::InvalidConfiguration(
                "n_physicians must be at least 1".into(),
            ));
        }

        self.arrival_time_dist.build("arrival_time_dist")?;
        self.exam_time_dist.build("exam_time_dist")?;
        self.mental_health_consult_time_dist
            .build("mental_health_consult_time_dist")?;

        // A zero-mean arrival process never advances the clock.
        if self.arrival_time_dist.mean() <= 0.0 {
            return Err(CoreError::InvalidConfiguration(
                "arrival_time_dist must have a positive mean".into(),
            ));
        }
        Ok(())
    }

    /// `hours_open` as a [`SimTime`].
    pub fn closing_time(&self) -> CoreResult<SimTime> {
        SimTime::new(self.hours_open).map_err(|_| {
            CoreError::InvalidConfiguration(format!(
                "hours_open must be finite and >= 0, got {}",
                self.hours_open
            ))
        })
    }
}
