//! Fixed-rate game loop driver.
//!
//! One dedicated thread ticks the game and renders a snapshot at a target
//! rate. When a frame overruns, a bounded number of catch-up ticks are run
//! without rendering so game speed stays steady under short lag spikes.

use super::config::GameConfig;
use super::engine::{GameSnapshot, Tickable};
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Draws a frame. Must not mutate the game; it only ever sees a snapshot.
pub trait Renderer: Send {
    fn render(&mut self, snapshot: &GameSnapshot);
}

/// Callbacks run on the loop thread around the loop body.
pub trait LoopHooks: Send {
    fn on_startup(&mut self) {}
    fn on_shutdown(&mut self) {}
}

impl LoopHooks for () {}

/// What to do after a frame finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    /// Time left in the frame budget.
    pub sleep: Duration,
    /// Extra update-only ticks to run because the frame overran.
    pub catch_up: u32,
}

/// Frame timing policy.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    period: Duration,
    max_skipped_frames: u32,
}

impl FramePacer {
    pub fn new(period: Duration, max_skipped_frames: u32) -> Self {
        Self {
            period,
            max_skipped_frames,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.frame_period(), config.max_skipped_frames)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Plan the rest of a frame that took `elapsed`.
    ///
    /// Under budget: sleep the remainder. Over budget: one catch-up tick per
    /// started period of overrun, capped at `max_skipped_frames`, and no
    /// sleep.
    pub fn plan(&self, elapsed: Duration) -> FramePlan {
        if elapsed <= self.period {
            return FramePlan {
                sleep: self.period - elapsed,
                catch_up: 0,
            };
        }
        if self.period.is_zero() {
            return FramePlan {
                sleep: Duration::ZERO,
                catch_up: 0,
            };
        }

        let overrun = (elapsed - self.period).as_nanos();
        let behind = overrun.div_ceil(self.period.as_nanos());
        FramePlan {
            sleep: Duration::ZERO,
            catch_up: behind.min(self.max_skipped_frames as u128) as u32,
        }
    }
}

/// Handle on a running loop thread.
pub struct LoopHandle<R> {
    running: Arc<AtomicBool>,
    thread: JoinHandle<R>,
}

impl<R> LoopHandle<R> {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.thread.is_finished()
    }

    /// Ask the loop to stop after the current frame and wait for it.
    ///
    /// Returns the renderer so a later loop can reuse it, or `None` if the
    /// loop thread panicked.
    pub fn stop(self) -> Option<R> {
        self.running.store(false, Ordering::Release);
        match self.thread.join() {
            Ok(renderer) => Some(renderer),
            Err(_) => {
                warn!("Game loop thread panicked");
                None
            }
        }
    }
}

pub struct GameLoop;

impl GameLoop {
    /// Start the loop on a thread named "game loop".
    pub fn spawn<T, R, H>(
        target: T,
        mut renderer: R,
        mut hooks: H,
        pacer: FramePacer,
    ) -> Result<LoopHandle<R>>
    where
        T: Tickable + 'static,
        R: Renderer + 'static,
        H: LoopHooks + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("game loop".to_string())
            .spawn(move || {
                info!(period_ms = pacer.period().as_millis() as u64, "Game loop started");
                hooks.on_startup();
                while flag.load(Ordering::Acquire) {
                    run_frame(&target, &mut renderer, &pacer);
                }
                hooks.on_shutdown();
                info!("Game loop stopped");
                renderer
            })?;

        Ok(LoopHandle { running, thread })
    }
}

/// One update + render cycle, followed by catch-up or sleep.
fn run_frame<T: Tickable, R: Renderer>(target: &T, renderer: &mut R, pacer: &FramePacer) {
    let begin = Instant::now();
    target.tick();
    renderer.render(&target.snapshot());

    let plan = pacer.plan(begin.elapsed());
    if plan.catch_up > 0 {
        debug!(ticks = plan.catch_up, "Game loop behind, catching up");
        for _ in 0..plan.catch_up {
            target.tick();
        }
    }
    if !plan.sleep.is_zero() {
        thread::sleep(plan.sleep);
    }
}
