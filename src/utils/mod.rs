//! Utility modules: build info, logging, persistence.

pub mod build_info;
pub mod logging;
pub mod persistence;
pub mod score_store;

pub use score_store::{FileScoreStore, ScoreStore};
