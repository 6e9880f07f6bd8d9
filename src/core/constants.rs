// Collision threshold: a barrier is evaluated once its position passes this.
pub const LIMIT: f32 = 1.0;

// Base speed multiplier (barrier travel per second at score 0, in LIMIT units)
pub const SPEED_FACTOR: f32 = 0.5;

// Tick and timing
pub const PREFERRED_TICK_RATE: u32 = 60; // updates per second
pub const FRAME_PERIOD_MS: u64 = 1000 / PREFERRED_TICK_RATE as u64;
pub const MAX_SKIPPED_FRAMES: u32 = 5;

// Speed grows by 1% of the base speed for every point scored.
pub const SPEED_GROWTH_DIVISOR: f32 = 100.0;

// Barriers
pub const NUMBER_OF_BARRIERS: usize = 3;
pub const BASE_SPEED: f32 = SPEED_FACTOR / PREFERRED_TICK_RATE as f32;
pub const DISTANCE_DELTA: f32 = LIMIT / NUMBER_OF_BARRIERS as f32;

// Persistence
pub const HIGH_SCORE_FILE: &str = "highscore";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "cirech.log";
pub const DATA_DIR_ENV: &str = "CIRECH_DATA_DIR";
