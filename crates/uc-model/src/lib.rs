//! `uc-model` — the clinic and the events that drive it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`patient`]   | `Patient`, `Visit`                                        |
//! | [`facility`]  | `UrgentCare`, `ServerPool`, `Samplers`                    |
//! | [`event`]     | `Event`, `EventKind`, `Outcome`                           |
//! | [`stats`]     | `FacilityStats`, `SampleStats`, `TimeWeighted`            |
//! | [`error`]     | `ModelError`, `ModelResult<T>`                            |
//!
//! # Event protocol
//!
//! ```text
//! Event::process(self, &mut UrgentCare, &mut EventCalendar<Event>, &mut SimRng)
//!   ① read + mutate the facility
//!   ② draw from the shared SimRng (never a private one)
//!   ③ calendar.add(..) zero or more follow-on events, never before calendar.time()
//! ```
//!
//! The taxonomy is closed: `Arrival`, `CloseUrgentCare`, `EndOfExam`,
//! `EndOfMentalHealthConsult`.

pub mod error;
pub mod event;
pub mod facility;
pub mod patient;
pub mod stats;

#[cfg(test)]
mod tests;

pub use error::{ModelError, ModelResult};
pub use event::{Event, EventKind, Outcome};
pub use facility::{Samplers, ServerPool, UrgentCare};
pub use patient::{Patient, Visit};
pub use stats::{FacilityStats, SampleStats, TimeWeighted};

/// The calendar type every clinic event is scheduled on.
pub type Calendar = uc_calendar::EventCalendar<Event>;
