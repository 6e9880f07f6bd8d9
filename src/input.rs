//! Input handling: terminal keys to gestures, gestures to game commands.
//!
//! Each gesture is applied under a single engine lock, so reading the state
//! and acting on it cannot race with a tick.

use crate::core::engine::Engine;
use crate::core::game_state::GameState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

/// UI-agnostic player gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Primary press: switch color while playing.
    Press,
    /// Single tap: resume a paused game.
    Tap,
    /// Downward swipe: start from the menu, restart after game over.
    SwipeDown,
}

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running.
    Continue,
    /// The player asked to leave.
    Quit,
}

/// Map a key to a gesture. Space/Up press, Enter taps, Down/`s` swipes.
pub fn gesture_for_key(key: KeyEvent) -> Option<Gesture> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => Some(Gesture::Press),
        KeyCode::Enter => Some(Gesture::Tap),
        KeyCode::Down | KeyCode::Char('s') => Some(Gesture::SwipeDown),
        _ => None,
    }
}

/// Apply a gesture to the game. Returns true if it changed anything.
pub fn handle_gesture(engine: &Engine, gesture: Gesture) -> bool {
    engine.with_game(|game| match (gesture, game.state()) {
        (Gesture::Press, GameState::Play) => {
            game.switch_color();
            true
        }
        (Gesture::Tap, GameState::Pause) => {
            game.set_state(GameState::Play);
            true
        }
        (Gesture::SwipeDown, GameState::Menu) => {
            game.set_state(GameState::Play);
            true
        }
        (Gesture::SwipeDown, GameState::GameOver) => {
            game.reset();
            game.set_state(GameState::Play);
            true
        }
        (gesture, state) => {
            debug!(?gesture, ?state, "Gesture ignored");
            false
        }
    })
}

/// Dispatch one key event.
pub fn handle_key(engine: &Engine, key: KeyEvent) -> InputResult {
    let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
    if quit && key.kind != KeyEventKind::Release {
        return InputResult::Quit;
    }

    if let Some(gesture) = gesture_for_key(key) {
        handle_gesture(engine, gesture);
    }
    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::game::CirechGame;
    use crate::core::game_state::ColorTag;

    fn engine_in(state: GameState) -> Engine {
        let engine = Engine::new(CirechGame::with_seed(GameConfig::default(), 9));
        engine.set_state(state);
        engine
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(gesture_for_key(key(KeyCode::Char(' '))), Some(Gesture::Press));
        assert_eq!(gesture_for_key(key(KeyCode::Up)), Some(Gesture::Press));
        assert_eq!(gesture_for_key(key(KeyCode::Enter)), Some(Gesture::Tap));
        assert_eq!(gesture_for_key(key(KeyCode::Down)), Some(Gesture::SwipeDown));
        assert_eq!(gesture_for_key(key(KeyCode::Char('s'))), Some(Gesture::SwipeDown));
        assert_eq!(gesture_for_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_press_switches_color_only_in_play() {
        let engine = engine_in(GameState::Play);
        assert!(handle_gesture(&engine, Gesture::Press));
        assert_eq!(engine.snapshot().current_color, ColorTag::Secondary);

        let engine = engine_in(GameState::Pause);
        assert!(!handle_gesture(&engine, Gesture::Press));
        assert_eq!(engine.snapshot().current_color, ColorTag::Primary);
    }

    #[test]
    fn test_tap_resumes_pause() {
        let engine = engine_in(GameState::Pause);
        assert!(handle_gesture(&engine, Gesture::Tap));
        assert_eq!(engine.state(), GameState::Play);

        let engine = engine_in(GameState::Menu);
        assert!(!handle_gesture(&engine, Gesture::Tap));
        assert_eq!(engine.state(), GameState::Menu);
    }

    #[test]
    fn test_swipe_starts_from_menu() {
        let engine = engine_in(GameState::Menu);
        assert!(handle_gesture(&engine, Gesture::SwipeDown));
        assert_eq!(engine.state(), GameState::Play);
    }

    #[test]
    fn test_swipe_restarts_after_game_over() {
        let engine = engine_in(GameState::GameOver);
        engine.with_game(|g| {
            g.score = 17;
            g.high_score = 17;
        });

        assert!(handle_gesture(&engine, Gesture::SwipeDown));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.state, GameState::Play);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.high_score, 17);
    }

    #[test]
    fn test_swipe_ignored_while_playing() {
        let engine = engine_in(GameState::Play);
        engine.with_game(|g| g.score = 3);
        assert!(!handle_gesture(&engine, Gesture::SwipeDown));
        assert_eq!(engine.snapshot().score, 3);
    }

    #[test]
    fn test_quit_keys() {
        let engine = engine_in(GameState::Menu);
        assert_eq!(handle_key(&engine, key(KeyCode::Char('q'))), InputResult::Quit);
        assert_eq!(handle_key(&engine, key(KeyCode::Esc)), InputResult::Quit);
        assert_eq!(
            handle_key(&engine, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputResult::Quit
        );
        assert_eq!(handle_key(&engine, key(KeyCode::Down)), InputResult::Continue);
        assert_eq!(engine.state(), GameState::Play);
    }
}
