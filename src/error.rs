//! Errors raised while building or drawing widgets.
//!
//! Scheduler failures live in `scheduler::SchedulerError`; everything a caller
//! can get wrong while configuring the screen ends up here.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown border style `{0}` (expected light, heavy, double or curved)")]
    UnknownBorderStyle(String),

    #[error("unknown widget type `{0}`")]
    UnknownWidgetType(String),

    #[error("layout line {line}: {reason}")]
    InvalidLayout { line: usize, reason: String },

    #[error("cannot broadcast {found:?} cells into a region of shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("index {index} is out of bounds for an axis of length {len}")]
    IndexOutOfBounds { index: i32, len: usize },

    #[error(transparent)]
    InvalidKey(#[from] crate::core::event::ParseKeyError),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Scheduler(#[from] crate::scheduler::SchedulerError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownBorderStyle(_)
                | Error::UnknownWidgetType(_)
                | Error::InvalidLayout { .. }
                | Error::InvalidKey(_)
                | Error::Config(_)
        )
    }
}
