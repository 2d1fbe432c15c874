//! Game engine - owns the session and advances it one tick at a time.
//!
//! This module ties together the board, pieces, piece source and scoring.
//! The only mutating entry points are [`GameEngine::tick`], the pause/focus
//! controls and [`GameEngine::reset`]; everything else is a read-only view.
//!
//! Per tick:
//! 1. start-or-pause toggles Running/Paused (or resets after game over)
//! 2. nothing else happens unless Running
//! 3. spawn if there is no current piece
//! 4. rate-limited lateral, rotation and move-down intents
//! 5. automatic fall once the fall interval has elapsed
//! 6. if the piece now overlaps, revert it one row, lock it, spawn, score,
//!    clear lines and test the fresh piece for game over

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::collision::{detect_collision_below, piece_collides};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::pieces::{spawn_next_and_current, Piece, PieceSnapshot};
use crate::rng::PieceSource;
use crate::scoring::{
    cleared_line_score, fall_rate_for_level, interval_ms, level_for_lines, piece_score,
};
use crate::snapshot::GameSnapshot;
use crate::transform::{move_down, move_left, move_right, rotate_left, rotate_right};
use crate::types::{GameStatus, Intent, IntentSet, PieceKind};

/// Seed used when the config does not pin one.
pub const DEFAULT_SEED: u32 = 1;

/// Emitted when a piece locks into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub piece_score: u32,
    pub line_score: u32,
    /// Level after the lock
    pub level: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// Last-applied timestamp of one intent category.
///
/// `None` means the intent was inactive since it last fired, so the next
/// activation applies immediately.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatTimer {
    last_applied_ms: Option<u64>,
}

impl RepeatTimer {
    /// Fire if the threshold has passed, recording `now_ms` when it does
    fn ready(&mut self, now_ms: u64, threshold_ms: u64) -> bool {
        let due = match self.last_applied_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > threshold_ms,
        };
        if due {
            self.last_applied_ms = Some(now_ms);
        }
        due
    }

    fn clear(&mut self) {
        self.last_applied_ms = None;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct InputTimers {
    left: RepeatTimer,
    right: RepeatTimer,
    down: RepeatTimer,
    rotate: RepeatTimer,
}

/// Edge trigger for intents that act once per activation.
#[derive(Debug, Clone, Copy, Default)]
struct Latch {
    consumed: bool,
}

impl Latch {
    /// Forget the consumption once the intent is released
    fn observe(&mut self, held: bool) {
        if !held {
            self.consumed = false;
        }
    }

    /// Held and not yet consumed
    fn live(&self, held: bool) -> bool {
        held && !self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    source: PieceSource,
    score: u32,
    lines: u32,
    status: GameStatus,
    /// Paused by focus loss rather than by the player
    auto_paused: bool,
    last_tick_ms: Option<u64>,
    /// Time since the piece last fell automatically
    fall_timer_ms: u64,
    timers: InputTimers,
    start_latch: Latch,
    down_latch: Latch,
    last_event: Option<LockEvent>,
}

impl GameEngine {
    /// Start a session on an empty board with the first pieces spawned
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_width, config.board_height);
        let mut engine = Self::assemble(config, board);
        engine.reset();
        Ok(engine)
    }

    /// Start a session on a prepared board.
    ///
    /// No piece is spawned yet; the first running tick spawns one and ends
    /// the session right away if it does not fit.
    pub fn with_board(config: EngineConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.width() != config.board_width || board.height() != config.board_height {
            return Err(ConfigError::BoardMismatch {
                width: config.board_width,
                height: config.board_height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        Ok(Self::assemble(config, board))
    }

    fn assemble(config: EngineConfig, board: Board) -> Self {
        let source = PieceSource::new(config.randomizer, config.seed.unwrap_or(DEFAULT_SEED));
        Self {
            config,
            board,
            current: None,
            next: None,
            source,
            score: 0,
            lines: 0,
            status: GameStatus::Running,
            auto_paused: false,
            last_tick_ms: None,
            fall_timer_ms: 0,
            timers: InputTimers::default(),
            start_latch: Latch::default(),
            down_latch: Latch::default(),
            last_event: None,
        }
    }

    /// Reinitialize board, score, lines and pieces and set Running.
    ///
    /// The piece source keeps its position, so a new session gets new pieces.
    pub fn reset(&mut self) {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.current = None;
        self.next = None;
        self.auto_paused = false;
        self.last_tick_ms = None;
        self.fall_timer_ms = 0;
        self.timers = InputTimers::default();
        self.last_event = None;
        self.status = GameStatus::Running;
        info!("session reset");
        self.spawn_checked();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines, &self.config.level_thresholds)
    }

    /// Automatic fall rate for the current level (steps per second)
    pub fn fall_rate(&self) -> f64 {
        fall_rate_for_level(self.level(), &self.config.fall_rates)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Paused by focus loss (and therefore eligible for auto-resume)
    pub fn is_auto_paused(&self) -> bool {
        self.auto_paused
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the current piece would come to rest on
    pub fn ghost_y(&self) -> Option<i32> {
        let mut piece = self.current?;
        if piece_collides(&self.board, &piece) {
            return Some(piece.y);
        }
        while !detect_collision_below(&self.board, &piece) {
            piece = move_down(piece);
        }
        Some(piece.y)
    }

    /// Player pause toggle. Ignored after game over.
    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => {
                self.auto_paused = false;
                self.status = GameStatus::Paused;
                info!("paused");
            }
            GameStatus::Paused => self.resume(),
            GameStatus::GameOver => {}
        }
    }

    /// The window lost focus: pause a running game and remember why
    pub fn focus_lost(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
            self.auto_paused = true;
            info!("auto-paused on focus loss");
        }
    }

    /// Focus is back: resume only if focus loss caused the pause
    pub fn focus_gained(&mut self) {
        if self.status == GameStatus::Paused && self.auto_paused {
            self.resume();
        }
    }

    fn resume(&mut self) {
        self.auto_paused = false;
        self.status = GameStatus::Running;
        info!("resumed");
    }

    /// Advance the session to `now_ms` with the intents active this frame.
    ///
    /// `now_ms` is a monotonic timestamp; elapsed time is always measured
    /// against the previous tick, so irregular frame times do not drift.
    /// Returns the lock that happened during this tick, if any.
    pub fn tick(&mut self, now_ms: u64, intents: IntentSet) -> Option<LockEvent> {
        let mut elapsed = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_tick_ms = Some(now_ms);

        let start_held = intents.contains(Intent::StartOrPause);
        if self.start_latch.live(start_held) {
            self.start_latch.consume();
            match self.status {
                GameStatus::GameOver => {
                    // the fresh session starts its clock at this tick
                    self.reset();
                    self.last_tick_ms = Some(now_ms);
                    elapsed = 0;
                }
                _ => self.toggle_pause(),
            }
        }
        self.start_latch.observe(start_held);

        if self.status != GameStatus::Running {
            return None;
        }

        if self.current.is_none() && !self.spawn_checked() {
            return None;
        }

        self.apply_intents(now_ms, intents);

        self.fall_timer_ms += elapsed;
        if self.fall_timer_ms > interval_ms(self.fall_rate()) {
            self.fall_timer_ms = 0;
            self.step_down();
        }

        self.settle()
    }

    // Move-down runs last so an instant drop is settled in this same tick.
    fn apply_intents(&mut self, now_ms: u64, intents: IntentSet) {
        let lateral_ms = interval_ms(self.config.lateral_movement_rate);
        let down_ms = interval_ms(self.config.down_movement_rate);

        if intents.contains(Intent::MoveLeft) {
            if self.timers.left.ready(now_ms, lateral_ms) {
                self.replace_current(|p, b| move_left(p, b));
            }
        } else {
            self.timers.left.clear();
        }

        if intents.contains(Intent::MoveRight) {
            if self.timers.right.ready(now_ms, lateral_ms) {
                self.replace_current(|p, b| move_right(p, b));
            }
        } else {
            self.timers.right.clear();
        }

        let rotate_left_held = intents.contains(Intent::RotateLeft);
        let rotate_right_held = intents.contains(Intent::RotateRight);
        if rotate_left_held || rotate_right_held {
            if self.timers.rotate.ready(now_ms, lateral_ms) {
                if rotate_left_held {
                    self.replace_current(|p, b| rotate_left(p, b));
                }
                if rotate_right_held {
                    self.replace_current(|p, b| rotate_right(p, b));
                }
            }
        } else {
            self.timers.rotate.clear();
        }

        let down_held = intents.contains(Intent::MoveDown);
        self.down_latch.observe(down_held);
        if self.down_latch.live(down_held) {
            if self.timers.down.ready(now_ms, down_ms) {
                self.fall_timer_ms = 0;
                if self.config.instant_down {
                    self.drop_to_floor();
                    self.down_latch.consume();
                } else {
                    self.step_down();
                }
            }
        } else {
            self.timers.down.clear();
        }
    }

    fn replace_current(&mut self, f: impl FnOnce(Piece, &Board) -> Piece) {
        if let Some(piece) = self.current {
            self.current = Some(f(piece, &self.board));
        }
    }

    /// One optimistic row down. Skipped while the piece already overlaps, so
    /// the lock revert always lands on the last free row.
    fn step_down(&mut self) {
        if let Some(piece) = self.current {
            if !piece_collides(&self.board, &piece) {
                self.current = Some(move_down(piece));
            }
        }
    }

    /// Fall until resting, then one more step so this tick's settle locks it
    fn drop_to_floor(&mut self) {
        while let Some(piece) = self.current {
            if detect_collision_below(&self.board, &piece) {
                break;
            }
            self.current = Some(move_down(piece));
        }
        self.step_down();
    }

    /// Replace current/next with a fresh pair. Does not check the fit.
    fn spawn(&mut self) {
        let spawned = spawn_next_and_current(self.next, self.board.width(), &mut self.source);
        debug!(
            current = spawned.current.kind.as_str(),
            next = spawned.next.kind.as_str(),
            "spawned"
        );
        self.current = Some(spawned.current);
        self.next = Some(spawned.next);
    }

    /// Spawn and end the session if the fresh piece does not fit
    fn spawn_checked(&mut self) -> bool {
        self.spawn();
        !self.check_game_over()
    }

    fn check_game_over(&mut self) -> bool {
        let blocked = self
            .current
            .is_some_and(|piece| piece_collides(&self.board, &piece));
        if blocked {
            self.status = GameStatus::GameOver;
            warn!(score = self.score, lines = self.lines, "game over");
        }
        blocked
    }

    /// Lock the current piece if its last downward step made it overlap
    fn settle(&mut self) -> Option<LockEvent> {
        let piece = self.current?;
        if !piece_collides(&self.board, &piece) {
            return None;
        }

        // The overlap can only come from a downward step (lateral moves and
        // rotations reject themselves), so one row up is the resting place.
        let resting = Piece {
            y: piece.y - 1,
            ..piece
        };
        self.board.merge_piece(&resting);
        self.spawn();

        let level_before = self.level();
        let lock_points = piece_score(level_before);
        self.score = self.score.saturating_add(lock_points);

        let cleared = self.board.full_rows().len();
        let mut line_points = 0;
        if cleared > 0 {
            line_points = cleared_line_score(cleared, level_before);
            self.score = self.score.saturating_add(line_points);
            self.lines = self.lines.saturating_add(cleared as u32);
            self.board.clear_full_rows();
            info!(lines = cleared, total = self.lines, "lines cleared");
        }

        let level = self.level();
        if level > level_before {
            info!(level, "level up");
        }
        debug!(kind = resting.kind.as_str(), x = resting.x, y = resting.y, "locked");

        let game_over = self.check_game_over();
        let event = LockEvent {
            kind: resting.kind,
            lines_cleared: cleared as u32,
            piece_score: lock_points,
            line_score: line_points,
            level,
            level_up: level > level_before,
            game_over,
        };
        self.last_event = Some(event);
        Some(event)
    }

    /// Fill `out` with a read-only copy of the observable state, reusing its
    /// allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.current = self.current.map(PieceSnapshot::from);
        out.next = self.next.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.fall_rate = self.fall_rate();
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }
}
