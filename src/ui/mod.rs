//! Terminal rendering.

pub mod cirech_scene;
pub mod game_common;
pub mod palette;

pub use cirech_scene::{render_cirech_scene, TerminalRenderer};
pub use palette::Palette;
