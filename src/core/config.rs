//! Tunable game parameters.
//!
//! Defaults mirror the constants in [`crate::core::constants`]. A
//! `config.json` in the data directory may override any subset of fields.

use crate::core::constants::{
    LIMIT, MAX_SKIPPED_FRAMES, NUMBER_OF_BARRIERS, PREFERRED_TICK_RATE, SPEED_FACTOR,
    SPEED_GROWTH_DIVISOR,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base speed multiplier (K): distance covered per second at score 0.
    pub speed_factor: f32,
    /// Target updates per second.
    pub tick_rate: u32,
    /// Number of barriers on the track. Fixed for the lifetime of a game.
    pub barrier_count: usize,
    /// Max catch-up updates applied in one frame while the loop is behind.
    pub max_skipped_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            speed_factor: SPEED_FACTOR,
            tick_rate: PREFERRED_TICK_RATE,
            barrier_count: NUMBER_OF_BARRIERS,
            max_skipped_frames: MAX_SKIPPED_FRAMES,
        }
    }
}

impl GameConfig {
    /// Clamp values that would make the game degenerate (division by zero,
    /// empty track, non-positive speed).
    pub fn sanitized(mut self) -> Self {
        self.tick_rate = self.tick_rate.max(1);
        self.barrier_count = self.barrier_count.max(1);
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            self.speed_factor = SPEED_FACTOR;
        }
        self
    }

    /// Barrier speed at score 0, per tick.
    pub fn base_speed(&self) -> f32 {
        self.speed_factor / self.tick_rate as f32
    }

    /// Barrier speed per tick for the given score.
    pub fn speed_for_score(&self, score: u32) -> f32 {
        let base = self.base_speed();
        base + score as f32 * (base / SPEED_GROWTH_DIVISOR)
    }

    /// Minimum spacing between consecutive barriers.
    pub fn distance_delta(&self) -> f32 {
        LIMIT / self.barrier_count as f32
    }

    /// Target duration of one tick.
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(1000 / self.tick_rate as u64)
    }
}
