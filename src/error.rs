//! Crate-wide error type.
//!
//! Only the I/O collaborators (score store, config, terminal) can fail. The
//! game core itself is infallible.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CirechError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file")]
    Config(#[from] serde_json::Error),
    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
    #[error("High score file is truncated ({len} bytes, expected 4)")]
    CorruptScore { len: usize },
}

pub type Result<T> = std::result::Result<T, CirechError>;
