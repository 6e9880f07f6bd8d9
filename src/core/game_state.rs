//! Game state machine and color tags.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The four screens the game can be in.
///
/// Transitions are driven by the input and lifecycle layers, except
/// `Play -> GameOver`, which the engine triggers itself on a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Menu,
    Play,
    Pause,
    GameOver,
}

impl GameState {
    pub const ALL: [GameState; 4] = [Self::Menu, Self::Play, Self::Pause, Self::GameOver];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Play => "Play",
            Self::Pause => "Pause",
            Self::GameOver => "Game Over",
        }
    }
}

/// One of the two game colors.
///
/// The actual on-screen colors live in the renderer's palette; the engine
/// only ever compares tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Primary,
    Secondary,
}

impl ColorTag {
    /// The other color.
    pub fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Uniformly random tag.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_bool(rng.gen())
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::Secondary
        } else {
            Self::Primary
        }
    }

    pub fn as_bool(self) -> bool {
        matches!(self, Self::Secondary)
    }
}
