//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond parsing and formatting, so
//! they can be shared by the simulation, the terminal front end and tests.
//!
//! # Board Dimensions
//!
//! The board size is configured per session. The defaults match the classic
//! playfield:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Rates
//!
//! All rates are "steps per second". The engine turns a rate into a minimum
//! interval with `ceil(1000 / rate)` milliseconds.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_LATERAL_MOVEMENT_RATE` | 10.0 | Held left/right/rotate repeat rate |
//! | `DEFAULT_DOWN_MOVEMENT_RATE` | 20.0 | Held soft-drop repeat rate |
//! | `DEFAULT_FALL_RATES` | 1.0 .. 10.0 | Gravity per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, IntentSet, PieceKind};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! let mut intents = IntentSet::empty();
//! intents.insert(Intent::MoveLeft);
//! assert!(intents.contains(Intent::MoveLeft));
//! assert!(!intents.contains(Intent::MoveRight));
//!
//! assert_eq!(Intent::from_str("rotateLeft"), Some(Intent::RotateLeft));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: u16 = 20;

/// Narrowest board that still fits every catalog piece lying flat.
pub const MIN_BOARD_WIDTH: u16 = 4;

/// Default rate of player-driven lateral moves and rotations (steps per second)
pub const DEFAULT_LATERAL_MOVEMENT_RATE: f64 = 10.0;

/// Default rate of player-driven downward moves (steps per second)
pub const DEFAULT_DOWN_MOVEMENT_RATE: f64 = 20.0;

/// Automatic fall rate per level (steps per second), index 0 = level 1.
///
/// Levels beyond the table use the last entry.
pub const DEFAULT_FALL_RATES: [f64; 10] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0];

/// Cumulative lines needed to reach level 2, 3, ... respectively.
pub const DEFAULT_LEVEL_THRESHOLDS: [u32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Level of a fresh session.
pub const FIRST_LEVEL: u32 = 1;

/// Flat bonus for every locked piece at level 1.
pub const PIECE_LOCK_SCORE: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at once at level 1:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4+ lines: 1200 points
///
/// Points are multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell settled by a piece of the specified kind
pub type Cell = Option<PieceKind>;

/// Abstract player intents consumed by the engine.
///
/// Decoding raw device input into intents is the front end's job; the engine
/// only ever sees this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateLeft,
    RotateRight,
    StartOrPause,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::MoveDown,
        Intent::RotateLeft,
        Intent::RotateRight,
        Intent::StartOrPause,
    ];

    fn bit(self) -> u8 {
        match self {
            Intent::MoveLeft => 1 << 0,
            Intent::MoveRight => 1 << 1,
            Intent::MoveDown => 1 << 2,
            Intent::RotateLeft => 1 << 3,
            Intent::RotateRight => 1 << 4,
            Intent::StartOrPause => 1 << 5,
        }
    }

    /// Parse intent from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "movedown" => Some(Intent::MoveDown),
            "rotateleft" => Some(Intent::RotateLeft),
            "rotateright" => Some(Intent::RotateRight),
            "startorpause" => Some(Intent::StartOrPause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::MoveDown => "moveDown",
            Intent::RotateLeft => "rotateLeft",
            Intent::RotateRight => "rotateRight",
            Intent::StartOrPause => "startOrPause",
        }
    }
}

/// Set of intents active during one tick. Stack-only bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntentSet {
    bits: u8,
}

impl IntentSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, intent: Intent) {
        self.bits |= intent.bit();
    }

    pub fn remove(&mut self, intent: Intent) {
        self.bits &= !intent.bit();
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.bits & intent.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Builder-style insert, handy in tests and scripted input.
    pub fn with(mut self, intent: Intent) -> Self {
        self.insert(intent);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL.into_iter().filter(|i| self.contains(*i))
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut set = IntentSet::empty();
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}

/// Session state machine.
///
/// - **Running**: gameplay advances every tick
/// - **Paused**: ticks only watch for the start-or-pause intent
/// - **GameOver**: terminal until an explicit reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}
