//! Core game state and logic.

pub mod barrier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod game;
pub mod game_loop;
pub mod game_state;

pub use barrier::Barrier;
pub use config::GameConfig;
pub use constants::*;
pub use engine::{Engine, GameSnapshot, Tickable};
pub use game::{CirechGame, StateObserver, TickOutcome, INITIAL_COLOR};
pub use game_loop::{FramePacer, FramePlan, GameLoop, LoopHandle, LoopHooks, Renderer};
pub use game_state::{ColorTag, GameState};
