//! Thread-safe handle on the game.
//!
//! The tick thread and the input thread both mutate the game. Every mutation
//! goes through the one mutex held by [`Engine`], so `update_game` and
//! `set_state` never interleave. Observers run inside that critical section.

use super::game::{CirechGame, TickOutcome};
use super::game_state::{ColorTag, GameState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub state: GameState,
    pub current_color: ColorTag,
    pub score: u32,
    pub high_score: u32,
    /// `(color, position)` for each barrier, in track order.
    pub barriers: Vec<(ColorTag, f32)>,
}

impl GameSnapshot {
    pub fn of(game: &CirechGame) -> Self {
        Self {
            state: game.state(),
            current_color: game.current_color,
            score: game.score,
            high_score: game.high_score,
            barriers: game
                .barriers()
                .iter()
                .map(|b| (b.color(), b.position()))
                .collect(),
        }
    }
}

/// Anything the game loop can drive.
pub trait Tickable: Send + Sync {
    /// Advance one tick.
    fn tick(&self) -> TickOutcome;

    /// Capture the current frame for rendering.
    fn snapshot(&self) -> GameSnapshot;
}

#[derive(Clone)]
pub struct Engine {
    game: Arc<Mutex<CirechGame>>,
}

impl Engine {
    pub fn new(game: CirechGame) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// Lock the game. A panic inside an observer poisons the mutex; the game
    /// data is still consistent at field level, so the poison is ignored.
    fn lock(&self) -> MutexGuard<'_, CirechGame> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the game.
    pub fn with_game<T>(&self, f: impl FnOnce(&mut CirechGame) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn update_game(&self) -> TickOutcome {
        self.lock().update_game()
    }

    pub fn state(&self) -> GameState {
        self.lock().state()
    }

    pub fn set_state(&self, state: GameState) {
        self.lock().set_state(state);
    }

    pub fn switch_color(&self) {
        self.lock().switch_color();
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn high_score(&self) -> u32 {
        self.lock().high_score
    }

    pub fn offer_high_score(&self, score: u32) {
        self.lock().offer_high_score(score);
    }

    pub fn add_observer<F>(&self, observer: F)
    where
        F: FnMut(GameState) + Send + 'static,
    {
        self.lock().add_observer(observer);
    }

    pub fn set_observer<F>(&self, observer: F)
    where
        F: FnMut(GameState) + Send + 'static,
    {
        self.lock().set_observer(observer);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::of(&self.lock())
    }
}

impl Tickable for Engine {
    fn tick(&self) -> TickOutcome {
        self.update_game()
    }

    fn snapshot(&self) -> GameSnapshot {
        Engine::snapshot(self)
    }
}
