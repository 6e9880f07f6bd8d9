//! The game model: barrier track, current color, score and state machine.
//!
//! `CirechGame` is single-owner and `&mut`-driven. Sharing between the tick
//! thread and the input thread goes through [`crate::core::engine::Engine`],
//! which puts the whole model behind one mutex.

use super::barrier::Barrier;
use super::config::GameConfig;
use super::constants::LIMIT;
use super::game_state::{ColorTag, GameState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::debug;

/// Color the player starts each run with.
pub const INITIAL_COLOR: ColorTag = ColorTag::Primary;

/// Callback invoked on every state change, in registration order.
pub type StateObserver = Box<dyn FnMut(GameState) + Send>;

/// What happened during one call to [`CirechGame::update_game`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Barriers that crossed the limit with a matching color.
    pub barriers_passed: u32,
    /// A barrier crossed the limit with the wrong color.
    pub collided: bool,
}

pub struct CirechGame {
    /// Color the player is currently showing.
    pub current_color: ColorTag,
    /// Barriers passed in the current run.
    pub score: u32,
    /// Best score seen this session (or loaded from disk).
    pub high_score: u32,
    /// Distance every barrier advances per tick.
    pub barrier_speed: f32,
    barriers: Box<[Barrier]>,
    /// Index of the barrier furthest from the limit. New barriers are spaced
    /// relative to it.
    last_barrier: usize,
    state: GameState,
    config: GameConfig,
    rng: StdRng,
    observers: Vec<StateObserver>,
}

impl CirechGame {
    /// Create a game in the `Menu` state with a freshly generated track.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose barrier layout is reproducible.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let config = config.sanitized();
        let barriers: Box<[Barrier]> = (0..config.barrier_count)
            .map(|_| Barrier::new(INITIAL_COLOR, 0.0))
            .collect();

        let mut game = Self {
            current_color: INITIAL_COLOR,
            score: 0,
            high_score: 0,
            barrier_speed: config.base_speed(),
            barriers,
            last_barrier: 0,
            state: GameState::Menu,
            config,
            rng,
            observers: Vec::new(),
        };
        game.reset();
        game
    }

    /// Start a new run: score, speed, color and barrier layout are
    /// reinitialised. The high score and the state are left alone.
    pub fn reset(&mut self) {
        self.score = 0;
        self.update_speed();
        self.current_color = INITIAL_COLOR;
        self.generate_barriers();
    }

    /// Flip the player's color.
    pub fn switch_color(&mut self) {
        self.current_color = self.current_color.toggled();
    }

    /// Advance the game by one tick. Does nothing outside `Play`.
    ///
    /// Every barrier moves by `barrier_speed`, in track order. A barrier past
    /// [`LIMIT`] either scores (same color as the player) and is sent to the
    /// back of the queue, or ends the run. Once the run has ended, the rest of
    /// the track still moves this tick but nothing else scores.
    pub fn update_game(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.state != GameState::Play {
            return outcome;
        }

        for index in 0..self.barriers.len() {
            let barrier = &self.barriers[index];
            barrier.advance(self.barrier_speed);
            if outcome.collided || barrier.position() <= LIMIT {
                continue;
            }

            if barrier.color() != self.current_color {
                if self.score > self.high_score {
                    self.high_score = self.score;
                }
                outcome.collided = true;
                self.set_state(GameState::GameOver);
                continue;
            }

            self.regenerate_barrier(index);
            self.score += 1;
            self.update_speed();
            outcome.barriers_passed += 1;
        }

        outcome
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Change state and notify every observer with the new value.
    pub fn set_state(&mut self, state: GameState) {
        debug!(from = ?self.state, to = ?state, "State change");
        self.state = state;
        for observer in self.observers.iter_mut() {
            observer(state);
        }
    }

    /// Register an additional state observer.
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: FnMut(GameState) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Replace all registered observers with `observer`.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(GameState) + Send + 'static,
    {
        self.observers.clear();
        self.add_observer(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Raise the high score to `score` if it is better than the current one.
    ///
    /// Used when a stored high score arrives after play has already started.
    pub fn offer_high_score(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    pub fn last_barrier_index(&self) -> usize {
        self.last_barrier
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn update_speed(&mut self) {
        self.barrier_speed = self.config.speed_for_score(self.score);
    }

    /// Random gap in `[delta, 2 * delta)`.
    fn random_spacing(&mut self) -> f32 {
        let delta = self.config.distance_delta();
        self.rng.gen_range(delta..2.0 * delta)
    }

    /// Lay out the whole track from position 0 backwards.
    fn generate_barriers(&mut self) {
        let mut position = 0.0;
        for index in 0..self.barriers.len() {
            let color = ColorTag::random(&mut self.rng);
            let barrier = &self.barriers[index];
            barrier.set_color(color);
            barrier.set_position(position);
            position -= self.random_spacing();
        }
        self.last_barrier = self.barriers.len() - 1;
    }

    /// Move barrier `index` behind the current last barrier with a new color.
    fn regenerate_barrier(&mut self, index: usize) {
        let spacing = self.random_spacing();
        let position = self.barriers[self.last_barrier].position() - spacing;
        let color = ColorTag::random(&mut self.rng);

        let barrier = &self.barriers[index];
        barrier.set_position(position);
        barrier.set_color(color);
        self.last_barrier = index;
    }
}

impl Default for CirechGame {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl fmt::Debug for CirechGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CirechGame")
            .field("state", &self.state)
            .field("current_color", &self.current_color)
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("barrier_speed", &self.barrier_speed)
            .field("barriers", &self.barriers)
            .field("last_barrier", &self.last_barrier)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
