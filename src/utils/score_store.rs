//! High score persistence.
//!
//! The stored value is a single big-endian `u32` in a file named `highscore`.
//! Failures are never fatal: the loader logs and falls back to 0.

use crate::core::constants::HIGH_SCORE_FILE;
use crate::core::engine::Engine;
use crate::error::{CirechError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Where the high score is kept between sessions.
pub trait ScoreStore: Send + Sync {
    fn load(&self) -> Result<u32>;
    fn save(&self, score: u32) -> Result<()>;
}

/// File-backed store.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Store in `dir/highscore`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(HIGH_SCORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32> {
        let bytes = fs::read(&self.path)?;
        let head: [u8; 4] = bytes
            .get(..4)
            .and_then(|head| head.try_into().ok())
            .ok_or(CirechError::CorruptScore { len: bytes.len() })?;
        Ok(u32::from_be_bytes(head))
    }

    fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, score.to_be_bytes())?;
        Ok(())
    }
}

/// Load the stored high score, defaulting to 0 on any failure.
pub fn load_or_default(store: &dyn ScoreStore) -> u32 {
    match store.load() {
        Ok(score) => {
            debug!(score, "High score loaded");
            score
        }
        Err(CirechError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            info!("No stored high score yet");
            0
        }
        Err(e) => {
            warn!(error = %e, "Could not read high score, using 0");
            0
        }
    }
}

/// Save the high score, logging instead of failing.
pub fn save_or_log(store: &dyn ScoreStore, score: u32) {
    match store.save(score) {
        Ok(()) => debug!(score, "High score saved"),
        Err(e) => warn!(error = %e, score, "Could not save high score"),
    }
}

/// Load the high score on a background thread and hand it to the engine.
///
/// Play may start before this finishes; the engine only takes the value if
/// it beats the score already reached.
pub fn load_high_score_async<S>(store: S, engine: Engine) -> JoinHandle<u32>
where
    S: ScoreStore + 'static,
{
    thread::spawn(move || {
        let score = load_or_default(&store);
        engine.offer_high_score(score);
        score
    })
}
