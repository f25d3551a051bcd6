//! `uc-core` — foundational types for the urgent-care simulation.
//!
//! This crate is a dependency of every other `uc-*` crate.  It has no `uc-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ModelId`, `PatientId`                                |
//! | [`time`]        | `SimTime` (hours, totally ordered)                    |
//! | [`rng`]         | `SimRng` (one seeded stream per run)                  |
//! | [`dist`]        | `Sample` trait, `TimeDist` config, `Sampler`          |
//! | [`config`]      | `ClinicParams` + validation and JSON loading          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod dist;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ClinicParams;
pub use dist::{Sample, Sampler, TimeDist};
pub use error::{CoreError, CoreResult};
pub use ids::{ModelId, PatientId};
pub use rng::SimRng;
pub use time::SimTime;
