//! GRIDFALL - a falling-block puzzle for the terminal

mod board;
mod config;
mod difficulty;
mod game;
mod input;
mod menu;
mod piece;
mod score;
mod settings;
mod spawner;
mod tetromino;
mod ui;

use anyhow::Result;
use config::GameConfig;
use difficulty::Difficulty;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Game, GameState};
use input::InputHandler;
use menu::{Menu, MenuAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::stdout,
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Application state
enum AppState {
    Menu(Menu),
    Playing(Game, InputHandler),
}

/// Get the gridfall temp directory, creating it if needed
fn gridfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("gridfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> Result<()> {
    // Per-session log file so runs don't clobber each other
    let session_id: u32 = rand::random();
    let log_dir = gridfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridfall=debug".parse()?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        session = %format!("{:08x}", session_id),
        log = %log_dir.join(&log_file).display(),
        "gridfall starting up"
    );

    let settings = Settings::load();

    // An optional difficulty argument (easy/medium/hard) skips the menu;
    // an unknown name fails here, before the terminal is touched
    let start_difficulty = match std::env::args().nth(1) {
        Some(arg) => Some(arg.parse::<Difficulty>()?),
        None => None,
    };

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings, start_difficulty);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Ok(Some(game)) = &result {
        println!("\nThanks for playing GRIDFALL!");
        println!("Difficulty: {}", game.difficulty().name());
        println!("Final Score: {}", game.score.points);
        println!("Level: {} | Lines: {}", game.score.level, game.score.lines);
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    start_difficulty: Option<Difficulty>,
) -> Result<Option<Game>> {
    let mut state = match start_difficulty {
        Some(difficulty) => {
            let config =
                GameConfig::new(settings.board.width, settings.board.height, difficulty)?;
            AppState::Playing(Game::new(config), InputHandler::from_settings(settings))
        }
        None => AppState::Menu(Menu::new(settings.game.difficulty)),
    };
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| match &state {
            AppState::Menu(menu) => ui::render_menu(frame, menu),
            AppState::Playing(game, _) => ui::render_game(frame, game, settings),
        })?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                match &mut state {
                    AppState::Menu(menu) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key.code {
                            KeyCode::Up => menu.move_up(),
                            KeyCode::Down => menu.move_down(),
                            KeyCode::Enter => match menu.select() {
                                MenuAction::Start(difficulty) => {
                                    // Board dimensions come from settings and
                                    // are validated here, before any session
                                    // state exists
                                    let config = GameConfig::new(
                                        settings.board.width,
                                        settings.board.height,
                                        difficulty,
                                    )?;
                                    tracing::info!(%difficulty, "starting session");
                                    let game = Game::new(config);
                                    let input = InputHandler::from_settings(settings);
                                    state = AppState::Playing(game, input);
                                    last_tick = Instant::now();
                                }
                                MenuAction::Quit => return Ok(None),
                            },
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                            _ => {}
                        }
                    }
                    AppState::Playing(game, input) => {
                        if key.kind == KeyEventKind::Release {
                            input.key_up(key);
                            continue;
                        }
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }

                        // Esc on the game-over screen returns to the menu
                        if game.state == GameState::GameOver && key.code == KeyCode::Esc {
                            state = AppState::Menu(Menu::new(settings.game.difficulty));
                            continue;
                        }

                        for action in input.key_down(key) {
                            game.process_action(action);
                        }
                    }
                }
            }
        }

        // Per-tick update: held-key repeats, then gravity by wall-clock delta
        let delta = last_tick.elapsed();
        last_tick = Instant::now();

        let mut quit = false;
        if let AppState::Playing(game, input) = &mut state {
            for action in input.update() {
                game.process_action(action);
            }
            game.update(delta);

            if game.state == GameState::Paused {
                input.clear();
            }

            // Quit is only honored here, at the tick boundary
            quit = game.quit_requested;
        }
        if quit {
            if let AppState::Playing(game, _) =
                std::mem::replace(&mut state, AppState::Menu(Menu::new(settings.game.difficulty)))
            {
                return Ok(Some(game));
            }
        }
    }
}
