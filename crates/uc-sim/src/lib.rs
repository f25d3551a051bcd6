//! `uc-sim` — run loop orchestrator for the urgent-care simulation.
//!
//! # Run loop
//!
//! ```text
//! simulate(duration):
//!   seed SimRng from the model id
//!   fresh calendar + fresh clinic
//!   add CloseUrgentCare @ hours_open
//!   add Arrival(patient 0) @ first sampled inter-arrival time
//!   loop:
//!     calendar empty            → stop (CalendarExhausted)
//!     peek_time() > horizon     → stop (HorizonReached)
//!     next() → process(clinic, calendar, rng) → observer.on_event
//! ```
//!
//! The horizon is compared with the *next event's* time before it runs, so
//! nothing scheduled past the horizon is ever processed.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`run_replications`] on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use uc_core::{ClinicParams, ModelId};
//! use uc_sim::{NoopObserver, UrgentCareModel};
//!
//! let mut model = UrgentCareModel::new(ModelId(1), ClinicParams::default())?;
//! let summary = model.simulate(24.0, &mut NoopObserver)?;
//! println!("{} patients admitted", model.facility().stats().admitted);
//! ```

pub mod error;
pub mod model;
pub mod observer;
pub mod replication;


pub use error::{SimError, SimResult};
pub use model::{RunState, RunSummary, StopReason, UrgentCareModel};
pub use observer::{EventTrace, NoopObserver, ProcessedEvent, SimObserver};
pub use replication::{BatchSummary, ReplicationResult, run_replications};
