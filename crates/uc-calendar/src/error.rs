use thiserror::Error;

use uc_core::SimTime;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("next() called on an empty event calendar")]
    EmptyCalendar,

    #[error("event scheduled at {requested}, before the calendar clock {now}")]
    TimeOrderingViolation {
        requested: SimTime,
        now:       SimTime,
    },
}

pub type CalendarResult<T> = Result<T, CalendarError>;
