//! Duration distributions.
//!
//! [`TimeDist`] is the serialisable description found in parameter files;
//! [`TimeDist::build`] validates it and produces a [`Sampler`] backed by
//! `rand_distr`.  Events only ever see the [`Sample`] trait.
//!
//! All durations are in hours.
//!
//! # JSON shape
//!
//! ```json
//! { "kind": "exponential", "mean": 0.25 }
//! { "kind": "uniform", "low": 0.1, "high": 0.5 }
//! { "kind": "log_normal", "mean": 0.5, "st_dev": 0.2 }
//! ```

use rand_distr::{Distribution, Exp, Gamma, LogNormal, Uniform};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, SimRng};

/// Anything that can produce a non-negative duration from the run's RNG.
pub trait Sample {
    fn sample(&self, rng: &mut SimRng) -> f64;
}

// ── TimeDist ──────────────────────────────────────────────────────────────────

/// Configuration-level description of a duration distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeDist {
    /// Always `value`.
    Constant { value: f64 },
    /// Exponential with the given mean (rate = 1 / mean).
    Exponential { mean: f64 },
    /// Uniform on `[low, high]`.
    Uniform { low: f64, high: f64 },
    /// Gamma with shape `k` and scale `theta`.
    Gamma { shape: f64, scale: f64 },
    /// Log-normal parameterised by the mean and standard deviation of the
    /// distribution itself (not of the underlying normal).
    LogNormal { mean: f64, st_dev: f64 },
}

impl TimeDist {
    /// Expected value of the distribution.
    pub fn mean(&self) -> f64 {
        match *self {
            TimeDist::Constant { value }       => value,
            TimeDist::Exponential { mean }     => mean,
            TimeDist::Uniform { low, high }    => 0.5 * (low + high),
            TimeDist::Gamma { shape, scale }   => shape * scale,
            TimeDist::LogNormal { mean, .. }   => mean,
        }
    }

    /// Validate the parameters and build a ready-to-use [`Sampler`].
    ///
    /// `name` is only used in the error message.
    pub fn build(&self, name: &str) -> CoreResult<Sampler> {
        let invalid = |why: String| CoreError::InvalidConfiguration(format!("{name}: {why}"));

        match *self {
            TimeDist::Constant { value } => {
                require_non_negative(value, "value").map_err(invalid)?;
                Ok(Sampler::Constant(value))
            }
            TimeDist::Exponential { mean } => {
                require_positive(mean, "mean").map_err(invalid)?;
                let rate = 1.0 / mean;
                if !rate.is_finite() {
                    return Err(invalid(format!("mean {mean} is too small (rate overflows)")));
                }
                Exp::new(rate)
                    .map(Sampler::Exponential)
                    .map_err(|e| invalid(e.to_string()))
            }
            TimeDist::Uniform { low, high } => {
                require_non_negative(low, "low").map_err(invalid)?;
                require_non_negative(high, "high").map_err(invalid)?;
                if low > high {
                    return Err(invalid(format!("low ({low}) exceeds high ({high})")));
                }
                Ok(Sampler::Uniform(Uniform::new_inclusive(low, high)))
            }
            TimeDist::Gamma { shape, scale } => {
                require_positive(shape, "shape").map_err(invalid)?;
                require_positive(scale, "scale").map_err(invalid)?;
                Gamma::new(shape, scale)
                    .map(Sampler::Gamma)
                    .map_err(|e| invalid(e.to_string()))
            }
            TimeDist::LogNormal { mean, st_dev } => {
                require_positive(mean, "mean").map_err(invalid)?;
                require_non_negative(st_dev, "st_dev").map_err(invalid)?;
                // Moment matching: sigma^2 = ln(1 + sd^2 / m^2), mu = ln(m) - sigma^2 / 2.
                let sigma_sq = (1.0 + (st_dev / mean).powi(2)).ln();
                let mu = mean.ln() - 0.5 * sigma_sq;
                LogNormal::new(mu, sigma_sq.sqrt())
                    .map(Sampler::LogNormal)
                    .map_err(|e| invalid(e.to_string()))
            }
        }
    }
}

fn require_non_negative(v: f64, field: &str) -> Result<(), String> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be finite and >= 0, got {v}"))
    }
}

fn require_positive(v: f64, field: &str) -> Result<(), String> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be finite and > 0, got {v}"))
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────────

/// A validated distribution, ready to draw from.
#[derive(Clone, Debug)]
pub enum Sampler {
    Constant(f64),
    Exponential(Exp<f64>),
    Uniform(Uniform<f64>),
    Gamma(Gamma<f64>),
    LogNormal(LogNormal<f64>),
}

impl Sample for Sampler {
    fn sample(&self, rng: &mut SimRng) -> f64 {
        match self {
            Sampler::Constant(v)    => *v,
            Sampler::Exponential(d) => d.sample(rng.inner()),
            Sampler::Uniform(d)     => d.sample(rng.inner()),
            Sampler::Gamma(d)       => d.sample(rng.inner()),
            Sampler::LogNormal(d)   => d.sample(rng.inner()),
        }
    }
}
