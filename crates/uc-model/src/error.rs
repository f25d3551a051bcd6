use thiserror::Error;

use uc_calendar::CalendarError;
use uc_core::CoreError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ModelResult<T> = Result<T, ModelError>;
