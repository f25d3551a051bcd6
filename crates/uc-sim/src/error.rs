use thiserror::Error;

use uc_calendar::CalendarError;
use uc_core::CoreError;
use uc_model::ModelError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("event execution failed: {0}")]
    Model(#[from] ModelError),
}

pub type SimResult<T> = Result<T, SimError>;
