//! Integration test: session lifecycle
//!
//! Start, pause, stop and restart a session against an in-memory score store
//! and a renderer that records frames.

use cirech::lifecycle::Session;
use cirech::utils::score_store::{FileScoreStore, ScoreStore};
use cirech::{
    CirechError, CirechGame, Engine, FramePacer, GameConfig, GameSnapshot, GameState, Renderer,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Score store kept in memory. `None` behaves like a missing file.
#[derive(Clone, Default)]
struct MemoryStore {
    value: Arc<Mutex<Option<u32>>>,
}

impl MemoryStore {
    fn with(score: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(score))),
        }
    }

    fn stored(&self) -> Option<u32> {
        *self.value.lock().unwrap()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> cirech::Result<u32> {
        self.stored().ok_or(CirechError::NoDataDir)
    }

    fn save(&self, score: u32) -> cirech::Result<()> {
        *self.value.lock().unwrap() = Some(score);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FrameLog {
    frames: Arc<Mutex<Vec<GameSnapshot>>>,
}

impl Renderer for FrameLog {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.frames.lock().unwrap().push(snapshot.clone());
    }
}

/// Store whose load takes a while, like a slow disk.
#[derive(Clone)]
struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl ScoreStore for SlowStore {
    fn load(&self) -> cirech::Result<u32> {
        thread::sleep(self.delay);
        self.inner.load()
    }

    fn save(&self, score: u32) -> cirech::Result<()> {
        self.inner.save(score)
    }
}

fn fast_pacer() -> FramePacer {
    FramePacer::new(Duration::from_millis(1), 5)
}

fn engine() -> Engine {
    Engine::new(CirechGame::with_seed(GameConfig::default(), 77))
}

#[test]
fn test_start_loads_high_score_and_renders() {
    let store = MemoryStore::with(42);
    let frames = FrameLog::default();
    let mut session = Session::new(engine(), store, frames.clone(), fast_pacer());

    session.start().unwrap();
    assert_eq!(session.wait_for_high_score(), Some(42));
    assert!(session.is_running());

    thread::sleep(Duration::from_millis(30));
    session.stop();
    assert!(!session.is_running());

    let frames = frames.frames.lock().unwrap();
    assert!(!frames.is_empty());
    assert_eq!(frames[0].state, GameState::Menu);
    assert_eq!(session.engine().high_score(), 42);
}

#[test]
fn test_missing_score_defaults_to_zero() {
    let store = MemoryStore::default();
    let mut session = Session::new(engine(), store, FrameLog::default(), fast_pacer());

    session.start().unwrap();
    let loaded = session.wait_for_high_score();
    session.stop();

    assert_eq!(loaded, Some(0));
    assert_eq!(session.engine().high_score(), 0);
}

#[test]
fn test_pause_only_affects_play() {
    let session = Session::new(engine(), MemoryStore::default(), FrameLog::default(), fast_pacer());

    session.engine().set_state(GameState::Play);
    session.pause();
    assert_eq!(session.engine().state(), GameState::Pause);

    session.engine().set_state(GameState::GameOver);
    session.pause();
    assert_eq!(session.engine().state(), GameState::GameOver);

    session.engine().set_state(GameState::Menu);
    session.pause();
    session.resume();
    assert_eq!(session.engine().state(), GameState::Menu);
}

#[test]
fn test_stop_pauses_and_saves_high_score() {
    let store = MemoryStore::default();
    let mut session = Session::new(engine(), store.clone(), FrameLog::default(), fast_pacer());
    session.start().unwrap();
    session.wait_for_high_score();

    session.engine().with_game(|game| {
        game.high_score = 31;
        game.set_state(GameState::Play);
    });
    session.stop();

    // The loop may have ended the run before stop; either way it is no longer playing.
    assert_ne!(session.engine().state(), GameState::Play);
    assert_eq!(store.stored(), Some(31));
}

#[test]
fn test_restart_reuses_renderer() {
    let frames = FrameLog::default();
    let mut session = Session::new(engine(), MemoryStore::default(), frames.clone(), fast_pacer());
    session.start().unwrap();
    session.wait_for_high_score();
    thread::sleep(Duration::from_millis(10));
    session.stop();
    let after_first = frames.frames.lock().unwrap().len();

    session.restart().unwrap();
    assert!(session.is_running());
    thread::sleep(Duration::from_millis(10));
    session.stop();

    assert!(frames.frames.lock().unwrap().len() > after_first);
}

#[test]
fn test_loop_plays_game_until_collision() {
    let mut session = Session::new(engine(), MemoryStore::default(), FrameLog::default(), fast_pacer());
    session.start().unwrap();
    session.wait_for_high_score();
    session.engine().set_state(GameState::Play);

    // Never switching color, so the first mismatched barrier ends the run.
    let mut waited = 0;
    while session.engine().state() == GameState::Play && waited < 5_000 {
        thread::sleep(Duration::from_millis(5));
        waited += 5;
    }
    session.stop();

    let snapshot = session.engine().snapshot();
    assert_eq!(snapshot.state, GameState::GameOver);
    assert!(snapshot.high_score >= snapshot.score);
}

#[test]
fn test_file_store_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileScoreStore::in_dir(dir.path());

    let mut session = Session::new(engine(), store.clone(), FrameLog::default(), fast_pacer());
    session.start().unwrap();
    session.wait_for_high_score();
    session.engine().offer_high_score(19);
    session.stop();

    let mut next = Session::new(engine(), store, FrameLog::default(), fast_pacer());
    next.start().unwrap();
    let loaded = next.wait_for_high_score();
    next.stop();
    assert_eq!(loaded, Some(19));
    assert_eq!(next.engine().high_score(), 19);
}

#[test]
fn test_quick_stop_keeps_stored_high_score() {
    let store = SlowStore {
        inner: MemoryStore::with(100),
        delay: Duration::from_millis(200),
    };
    let mut session = Session::new(engine(), store.clone(), FrameLog::default(), fast_pacer());

    session.start().unwrap();
    session.stop();

    assert_eq!(store.inner.stored(), Some(100));
    assert_eq!(session.engine().high_score(), 100);
}

#[test]
fn test_stop_without_start_does_not_save() {
    let store = MemoryStore::with(64);
    let mut session = Session::new(engine(), store.clone(), FrameLog::default(), fast_pacer());

    session.stop();

    assert_eq!(store.stored(), Some(64));
    assert_eq!(session.wait_for_high_score(), None);
}
