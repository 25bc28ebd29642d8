//! Error types shared by the generator, the dump codec and the CLI

use crate::board::{MAX_HEIGHT, MAX_WIDTH};
use thiserror::Error;

/// Fatal errors. Placement and validation failures are not errors: workers
/// recover from them locally by resetting and retrying.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "board dimensions {width}x{height} are out of range (1x1 up to {}x{})",
        MAX_WIDTH,
        MAX_HEIGHT
    )]
    InvalidDimensions { width: usize, height: usize },

    #[error("no words to place")]
    NoWords,

    #[error("word #{index} is empty")]
    EmptyWord { index: usize },

    #[error("total length of words ({total}) is bigger than the board's capacity ({capacity})")]
    CapacityExceeded { total: usize, capacity: usize },

    #[error("malformed dump: {0}")]
    MalformedDump(String),

    #[error("invalid dump JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read dump: {0}")]
    Io(#[from] std::io::Error),

    #[error("all {workers} workers exited before producing a puzzle")]
    WorkersExited { workers: usize },
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the
    /// generator itself.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::WorkersExited { .. })
    }
}
