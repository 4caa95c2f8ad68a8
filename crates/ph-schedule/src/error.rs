use thiserror::Error;

use crate::ScheduleId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("schedule {0} defined twice")]
    Duplicate(ScheduleId),

    #[error("schedule {0} has no tasks")]
    Empty(ScheduleId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
