//! Cirech - a terminal color-matching reflex game.
//!
//! Colored barriers scroll towards the player's ball; the ball has to show
//! the same color as each barrier when it arrives. The library exposes the
//! game model, the fixed-rate loop driver and the I/O collaborators
//! (rendering, input, high score persistence, session lifecycle).

pub mod core;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod ui;
pub mod utils;

pub use crate::core::*;
pub use error::{CirechError, Result};
