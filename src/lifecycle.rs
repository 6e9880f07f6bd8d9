//! Session lifecycle: ties the engine, the score store and the game loop to
//! app-level events (start, focus lost/gained, quit).

use crate::core::engine::Engine;
use crate::core::game_loop::{FramePacer, GameLoop, LoopHandle, Renderer};
use crate::core::game_state::GameState;
use crate::error::Result;
use crate::utils::score_store::{load_high_score_async, save_or_log, ScoreStore};
use std::thread::JoinHandle;
use tracing::{info, warn};

pub struct Session<R, S> {
    engine: Engine,
    store: S,
    pacer: FramePacer,
    renderer: Option<R>,
    game_loop: Option<LoopHandle<R>>,
    high_score_loader: Option<JoinHandle<u32>>,
    /// Stored high score once the load has finished. Saving is skipped until
    /// then so a quick quit cannot overwrite it.
    loaded_high_score: Option<u32>,
}

impl<R, S> Session<R, S>
where
    R: Renderer + 'static,
    S: ScoreStore + Clone + 'static,
{
    pub fn new(engine: Engine, store: S, renderer: R, pacer: FramePacer) -> Self {
        Self {
            engine,
            store,
            pacer,
            renderer: Some(renderer),
            game_loop: None,
            high_score_loader: None,
            loaded_high_score: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Begin the session: load the high score in the background and start
    /// ticking. The game starts on the menu with a high score of 0 until the
    /// load completes.
    pub fn start(&mut self) -> Result<()> {
        if self.high_score_loader.is_none() && self.loaded_high_score.is_none() {
            self.high_score_loader = Some(load_high_score_async(
                self.store.clone(),
                self.engine.clone(),
            ));
        }
        self.start_loop()
    }

    /// Block until the stored high score has been loaded and return it.
    ///
    /// `None` if the session was never started or the loader panicked.
    pub fn wait_for_high_score(&mut self) -> Option<u32> {
        if let Some(loader) = self.high_score_loader.take() {
            match loader.join() {
                Ok(score) => self.loaded_high_score = Some(score),
                Err(_) => warn!("High score loader panicked"),
            }
        }
        self.loaded_high_score
    }

    /// The app lost focus: a running game pauses. Other states are kept.
    pub fn pause(&self) {
        self.engine.with_game(|game| {
            if game.state() == GameState::Play {
                game.set_state(GameState::Pause);
            }
        });
    }

    /// The app regained focus. The game stays paused until the player taps.
    pub fn resume(&self) {
        info!(state = ?self.engine.state(), "Session resumed");
    }

    /// The app is going away: pause, persist the high score and stop the
    /// loop after its current tick.
    pub fn stop(&mut self) {
        self.pause();
        if self.wait_for_high_score().is_some() {
            save_or_log(&self.store, self.engine.high_score());
        } else {
            warn!("Stored high score never loaded, not saving");
        }

        if let Some(handle) = self.game_loop.take() {
            self.renderer = handle.stop();
        }
        info!("Session stopped");
    }

    /// Start a new loop after [`Session::stop`].
    pub fn restart(&mut self) -> Result<()> {
        self.start_loop()
    }

    pub fn is_running(&self) -> bool {
        self.game_loop.as_ref().is_some_and(LoopHandle::is_running)
    }

    fn start_loop(&mut self) -> Result<()> {
        if self.game_loop.is_some() {
            return Ok(());
        }
        let Some(renderer) = self.renderer.take() else {
            warn!("Renderer lost after a loop panic, not restarting");
            return Ok(());
        };
        self.game_loop = Some(GameLoop::spawn(
            self.engine.clone(),
            renderer,
            (),
            self.pacer,
        )?);
        Ok(())
    }
}

impl<R, S> Drop for Session<R, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.game_loop.take() {
            handle.stop();
        }
    }
}
