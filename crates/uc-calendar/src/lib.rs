//! `uc-calendar` — the pending-event store of a discrete-event run.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`calendar`]  | `EventCalendar<E>`, `ScheduledEvent<E>`                   |
//! | [`error`]     | `CalendarError`, `CalendarResult<T>`                      |
//!
//! # Ordering model (summary)
//!
//! ```text
//! next()  → smallest scheduled time first
//!         → among equal times, the event added first (FIFO)
//! time()  → time of the most recently extracted event ("now")
//! add(t)  → rejected when t < time()
//! ```
//!
//! The calendar is generic over the event payload so that it knows nothing
//! about the clinic; `uc-model` instantiates it as `EventCalendar<Event>`.

pub mod calendar;
pub mod error;


pub use calendar::{EventCalendar, ScheduledEvent};
pub use error::{CalendarError, CalendarResult};
