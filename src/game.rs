//! Core game session state and logic

use crate::board::Board;
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::piece::Piece;
use crate::score::Score;
use crate::spawner::Spawner;
use std::time::Duration;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    /// Terminal; only a full reset leaves it
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
    Restart,
    Quit,
}

/// One game session: the grid, the live pieces, and the scoring state.
///
/// Everything is mutated through `process_action` and `update`; the renderer
/// only reads.
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece
    pub current: Piece,
    /// Preview piece, promoted when the current one locks
    pub next: Piece,
    /// Score / level / lines / fall-speed progression
    pub score: Score,
    /// Current session state
    pub state: GameState,
    /// Set when the player asked to quit; honored by the caller at a tick
    /// boundary
    pub quit_requested: bool,
    config: GameConfig,
    spawner: Spawner,
    /// Wall-clock time accumulated toward the next automatic fall
    fall_timer: Duration,
}

impl Game {
    /// Create a new session with a randomly seeded piece sequence
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, Spawner::new())
    }

    /// Create a new session with a caller-supplied spawner (deterministic
    /// sequences in tests)
    pub fn with_spawner(config: GameConfig, mut spawner: Spawner) -> Self {
        let board = Board::new(config.width, config.height);
        let current = spawner.spawn(config.width);
        let next = spawner.spawn(config.width);
        Self {
            board,
            current,
            next,
            score: Score::new(config.difficulty),
            state: GameState::Playing,
            quit_requested: false,
            config,
            spawner,
            fall_timer: Duration::ZERO,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Tear the whole session down to a fresh grid, pieces, and score,
    /// keeping the configuration
    pub fn reset(&mut self) {
        tracing::info!(difficulty = %self.config.difficulty, "session reset");
        *self = Self::new(self.config);
    }

    /// Apply one input command.
    ///
    /// Pause toggle, restart, and quit are always live; gameplay actions are
    /// swallowed unless the session is actively playing.
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::TogglePause => self.toggle_pause(),
            Action::Restart => self.reset(),
            Action::Quit => self.quit_requested = true,
            gameplay => {
                if self.state != GameState::Playing {
                    return;
                }
                match gameplay {
                    Action::MoveLeft => {
                        self.current.try_move(-1, 0, &self.board);
                    }
                    Action::MoveRight => {
                        self.current.try_move(1, 0, &self.board);
                    }
                    Action::SoftDrop => {
                        self.current.try_move(0, 1, &self.board);
                    }
                    Action::HardDrop => self.hard_drop(),
                    Action::Rotate => {
                        self.current.rotate(&self.board);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Advance the gravity timer by the elapsed wall-clock delta; when it
    /// reaches the fall speed, step the piece down or lock it in place.
    pub fn update(&mut self, delta: Duration) {
        if self.state != GameState::Playing {
            return;
        }
        self.fall_timer += delta;
        if self.fall_timer >= Duration::from_secs_f64(self.score.fall_speed) {
            self.fall_timer = Duration::ZERO;
            if !self.current.try_move(0, 1, &self.board) {
                self.place_current();
            }
        }
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::GameOver => GameState::GameOver,
        };
    }

    /// Drop the current piece to the bottom and lock it immediately.
    /// Atomic from the engine's perspective - no intermediate renders.
    fn hard_drop(&mut self) {
        self.current.drop_to_bottom(&self.board);
        self.place_current();
    }

    /// Stamp the current piece, clear full rows, then bring in the next
    /// piece. A blocked spawn ends the session.
    fn place_current(&mut self) {
        self.board
            .place(&self.current.shape, self.current.col, self.current.row, self.current.kind);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            let leveled_up = self.score.add_clear(cleared);
            tracing::debug!(
                cleared,
                lines = self.score.lines,
                score = self.score.points,
                "lines cleared"
            );
            if leveled_up {
                tracing::info!(
                    level = self.score.level,
                    fall_speed = self.score.fall_speed,
                    "level up"
                );
            }
        }

        self.fall_timer = Duration::ZERO;
        self.current = std::mem::replace(&mut self.next, self.spawner.spawn(self.config.width));

        if !self
            .board
            .fits(&self.current.shape, self.current.col, self.current.row)
        {
            tracing::info!(score = self.score.points, lines = self.score.lines, "game over");
            self.state = GameState::GameOver;
        }
    }
}
