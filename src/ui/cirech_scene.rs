//! Game scene rendering.
//!
//! Barriers are full-width bars dropping from the top of the play field
//! towards the ball at the bottom. Position 0 is the top row, [`LIMIT`] the
//! row just above the ball.

use super::game_common::{create_game_layout, render_message_box, render_status_bar};
use super::palette::Palette;
use crate::core::constants::LIMIT;
use crate::core::engine::GameSnapshot;
use crate::core::game_loop::Renderer;
use crate::core::game_state::GameState;
use rand::rngs::StdRng;
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, warn};

const BARRIER_CHAR: &str = "█";
const BALL_TOP: &str = "▄█████▄";
const BALL_BOTTOM: &str = "▀█████▀";
const BALL_ROWS: u16 = 2;

/// Render one frame of the game.
pub fn render_cirech_scene(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot, palette: &Palette) {
    let layout = create_game_layout(frame, area, " Cirech ", Color::Gray);

    let dimmed = matches!(snapshot.state, GameState::Pause | GameState::GameOver);
    if snapshot.state != GameState::Menu {
        render_barriers(frame, layout.content, snapshot, palette, dimmed);
    }
    render_ball(frame, layout.content, palette.color(snapshot.current_color));

    match snapshot.state {
        GameState::Menu => {
            render_message_box(
                frame,
                layout.content,
                "Cirech",
                Color::White,
                &[
                    "Match the ball to each barrier's color.".to_string(),
                    format!("High Score: {}", snapshot.high_score),
                    "Press [↓] to start".to_string(),
                ],
            );
            render_status_bar(
                frame,
                layout.status_bar,
                "",
                Color::White,
                &[("[↓]", "Start"), ("[q]", "Quit")],
            );
        }
        GameState::Play => {
            render_status_bar(
                frame,
                layout.status_bar,
                &format!("Score: {}   Best: {}", snapshot.score, snapshot.high_score),
                Color::White,
                &[("[Space]", "Switch color"), ("[q]", "Quit")],
            );
        }
        GameState::Pause => {
            render_message_box(
                frame,
                layout.content,
                "Paused",
                Color::Yellow,
                &[
                    format!("Score: {}", snapshot.score),
                    "Press [Enter] to resume".to_string(),
                ],
            );
            render_status_bar(
                frame,
                layout.status_bar,
                "Paused",
                Color::Yellow,
                &[("[Enter]", "Resume"), ("[q]", "Quit")],
            );
        }
        GameState::GameOver => {
            render_message_box(
                frame,
                layout.content,
                "Game Over",
                Color::Red,
                &[
                    format!("Score: {}", snapshot.score),
                    format!("High Score: {}", snapshot.high_score),
                    "Press [↓] to restart".to_string(),
                ],
            );
            render_status_bar(
                frame,
                layout.status_bar,
                "Game over",
                Color::Red,
                &[("[↓]", "Restart"), ("[q]", "Quit")],
            );
        }
    }
}

/// Row of the play field a barrier at `position` sits on, if visible.
pub fn barrier_row(position: f32, track_rows: u16) -> Option<u16> {
    if track_rows == 0 || position < 0.0 {
        return None;
    }
    let row = (position / LIMIT * track_rows as f32) as u16;
    Some(row.min(track_rows - 1))
}

fn render_barriers(
    frame: &mut Frame,
    area: Rect,
    snapshot: &GameSnapshot,
    palette: &Palette,
    dimmed: bool,
) {
    let track_rows = area.height.saturating_sub(BALL_ROWS);
    for &(color, position) in &snapshot.barriers {
        let Some(row) = barrier_row(position, track_rows) else {
            continue;
        };
        let fg = if dimmed {
            Color::DarkGray
        } else {
            palette.color(color)
        };
        let bar = Paragraph::new(BARRIER_CHAR.repeat(area.width as usize))
            .style(Style::default().fg(fg));
        frame.render_widget(
            bar,
            Rect {
                y: area.y + row,
                height: 1,
                ..area
            },
        );
    }
}

fn render_ball(frame: &mut Frame, area: Rect, color: Color) {
    if area.height < BALL_ROWS {
        return;
    }
    let width = BALL_TOP.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height - BALL_ROWS;
    let style = Style::default().fg(color);

    let lines = vec![
        Line::from(Span::styled(BALL_TOP, style)),
        Line::from(Span::styled(BALL_BOTTOM, style)),
    ];
    frame.render_widget(
        Paragraph::new(lines),
        Rect::new(x, y, width.min(area.width), BALL_ROWS),
    );
}

/// Renderer drawing into a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    palette: Palette,
    /// Set when every run should get its own colors.
    palette_rng: Option<StdRng>,
    last_state: Option<GameState>,
    draw_failed: bool,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Renderer with a fixed palette.
    pub fn new(terminal: Terminal<B>, palette: Palette) -> Self {
        Self {
            terminal,
            palette,
            palette_rng: None,
            last_state: None,
            draw_failed: false,
        }
    }

    /// Renderer that draws a new random palette at the start of every run.
    pub fn with_random_palette(terminal: Terminal<B>, mut rng: StdRng) -> Self {
        let palette = Palette::random(&mut rng);
        Self {
            palette_rng: Some(rng),
            ..Self::new(terminal, palette)
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A run starts on the first `Play` frame after the menu or a game over.
    fn refresh_palette(&mut self, state: GameState) {
        let new_run = state == GameState::Play
            && matches!(self.last_state, Some(GameState::Menu | GameState::GameOver));
        self.last_state = Some(state);
        if !new_run {
            return;
        }
        if let Some(rng) = self.palette_rng.as_mut() {
            self.palette = Palette::random(rng);
            debug!(palette = ?self.palette, "New run palette");
        }
    }
}

impl<B: Backend + Send> Renderer for TerminalRenderer<B> {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.refresh_palette(snapshot.state);
        let palette = &self.palette;
        let result = self.terminal.draw(|frame| {
            let area = frame.size();
            render_cirech_scene(frame, area, snapshot, palette);
        });

        // Log the first failure only; at 60 frames per second anything more floods the log.
        match result {
            Ok(_) => self.draw_failed = false,
            Err(e) if !self.draw_failed => {
                warn!(error = %e, "Failed to draw frame");
                self.draw_failed = true;
            }
            Err(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::ColorTag;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    fn renderer() -> TerminalRenderer<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        TerminalRenderer::new(terminal, Palette::new(Color::Red, Color::Blue))
    }

    fn snapshot(state: GameState) -> GameSnapshot {
        GameSnapshot {
            state,
            current_color: ColorTag::Secondary,
            score: 7,
            high_score: 12,
            barriers: vec![
                (ColorTag::Primary, 0.5),
                (ColorTag::Secondary, -0.2),
                (ColorTag::Primary, -0.7),
            ],
        }
    }

    fn screen_text(renderer: &TerminalRenderer<TestBackend>) -> String {
        let buffer = renderer.terminal().backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_barrier_row_mapping() {
        assert_eq!(barrier_row(-0.1, 20), None);
        assert_eq!(barrier_row(0.0, 20), Some(0));
        assert_eq!(barrier_row(0.5, 20), Some(10));
        assert_eq!(barrier_row(LIMIT, 20), Some(19));
        assert_eq!(barrier_row(0.5, 0), None);
    }

    #[test]
    fn test_menu_shows_high_score() {
        let mut renderer = renderer();
        renderer.render(&snapshot(GameState::Menu));
        let text = screen_text(&renderer);
        assert!(text.contains("High Score: 12"));
        assert!(text.contains("to start"));
    }

    #[test]
    fn test_play_shows_score_and_barrier() {
        let mut renderer = renderer();
        renderer.render(&snapshot(GameState::Play));
        let text = screen_text(&renderer);
        assert!(text.contains("Score: 7"));
        assert!(text.contains(&BARRIER_CHAR.repeat(10)));

        // The visible barrier uses the primary color
        let buffer = renderer.terminal().backend().buffer();
        assert!(buffer
            .content
            .iter()
            .any(|cell| cell.symbol() == BARRIER_CHAR && cell.fg == Color::Red));
    }

    #[test]
    fn test_ball_uses_current_color() {
        let mut renderer = renderer();
        renderer.render(&snapshot(GameState::Play));
        let buffer = renderer.terminal().backend().buffer();
        assert!(buffer
            .content
            .iter()
            .any(|cell| cell.symbol() == "▄" && cell.fg == Color::Blue));
    }

    #[test]
    fn test_pause_and_game_over_overlays() {
        let mut renderer = renderer();
        renderer.render(&snapshot(GameState::Pause));
        assert!(screen_text(&renderer).contains("Paused"));

        renderer.render(&snapshot(GameState::GameOver));
        let text = screen_text(&renderer);
        assert!(text.contains("Game Over"));
        assert!(text.contains("High Score: 12"));
    }

    #[test]
    fn test_random_palette_redrawn_for_each_run() {
        let terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let mut renderer =
            TerminalRenderer::with_random_palette(terminal, StdRng::seed_from_u64(5));
        let first = *renderer.palette();

        renderer.render(&snapshot(GameState::Menu));
        assert_eq!(*renderer.palette(), first);

        renderer.render(&snapshot(GameState::Play));
        let second = *renderer.palette();
        assert_ne!(second, first);

        // Pausing and resuming stays in the same run
        renderer.render(&snapshot(GameState::Pause));
        renderer.render(&snapshot(GameState::Play));
        renderer.render(&snapshot(GameState::Play));
        assert_eq!(*renderer.palette(), second);

        renderer.render(&snapshot(GameState::GameOver));
        renderer.render(&snapshot(GameState::Play));
        assert_ne!(*renderer.palette(), second);
    }

    #[test]
    fn test_fixed_palette_never_changes() {
        let mut renderer = renderer();
        for state in [GameState::Menu, GameState::Play, GameState::GameOver, GameState::Play] {
            renderer.render(&snapshot(state));
        }
        assert_eq!(*renderer.palette(), Palette::new(Color::Red, Color::Blue));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let terminal = Terminal::new(TestBackend::new(4, 3)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal, Palette::default());
        for state in GameState::ALL {
            renderer.render(&snapshot(state));
        }
    }
}
