use cirech::core::{CirechGame, Engine, FramePacer};
use cirech::input::{handle_key, InputResult};
use cirech::lifecycle::Session;
use cirech::ui::TerminalRenderer;
use cirech::utils::build_info;
use cirech::utils::logging::init_file_logging;
use cirech::utils::persistence::{data_dir, load_config};
use cirech::utils::score_store::{FileScoreStore, ScoreStore};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

/// How long the input thread waits for an event before checking again.
const INPUT_POLL_MS: u64 = 50;

/// Restores the terminal when dropped, including on error paths.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableFocusChange, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableFocusChange, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let mut reset_score = false;

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return ExitCode::SUCCESS;
            }
            "--help" | "-h" => {
                println!("Cirech - match the color before the barrier hits\n");
                println!("Usage: cirech [option]\n");
                println!("Options:");
                println!("  --reset-score  Clear the stored high score");
                println!("  --version      Show version information");
                println!("  --help         Show this help message\n");
                println!("Controls: [Down] start/restart, [Space] switch color,");
                println!("          [Enter] resume, [q] quit");
                return ExitCode::SUCCESS;
            }
            "--reset-score" => reset_score = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'cirech --help' for usage.");
                return ExitCode::FAILURE;
            }
        }
    }

    match run(reset_score) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error");
            eprintln!("cirech: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(reset_score: bool) -> cirech::Result<()> {
    let dir = data_dir()?;
    init_file_logging(&dir)?;
    info!(data_dir = %dir.display(), "Starting cirech");

    let store = FileScoreStore::in_dir(&dir);
    if reset_score {
        store.save(0)?;
        println!("High score cleared.");
        return Ok(());
    }

    let config = load_config(&dir);
    info!(?config, "Configuration loaded");

    let engine = Engine::new(CirechGame::new(config.clone()));
    engine.add_observer(|state| info!(?state, "Game state changed"));

    let guard = TerminalGuard::enter()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let renderer = TerminalRenderer::with_random_palette(terminal, StdRng::from_entropy());

    let mut session = Session::new(
        engine,
        store,
        renderer,
        FramePacer::from_config(&config),
    );
    session.start()?;

    let result = input_loop(&session);

    // Loop must be stopped before the terminal is handed back
    session.stop();
    drop(guard);
    result
}

/// Read terminal events until the player quits.
fn input_loop<R, S>(session: &Session<R, S>) -> cirech::Result<()>
where
    R: cirech::Renderer + 'static,
    S: ScoreStore + Clone + 'static,
{
    loop {
        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_key(session.engine(), key) == InputResult::Quit {
                    return Ok(());
                }
            }
            Event::FocusLost => session.pause(),
            Event::FocusGained => session.resume(),
            _ => {}
        }
    }
}
