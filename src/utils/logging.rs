//! Tracing setup.
//!
//! The terminal belongs to the game, so logs go to a file in the data
//! directory. `RUST_LOG` overrides the default `info` filter.

use crate::core::constants::LOG_FILE;
use crate::error::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `dir/cirech.log`.
///
/// Calling this twice is harmless; the second subscriber is dropped.
pub fn init_file_logging(dir: &Path) -> Result<()> {
    let log_file = File::create(dir.join(LOG_FILE))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init();
    Ok(())
}
