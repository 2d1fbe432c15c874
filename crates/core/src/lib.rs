//! Core game logic - pure, deterministic and testable
//!
//! Everything needed to run a falling-block session without a screen or a
//! keyboard. The front end feeds [`GameEngine::tick`] a monotonic timestamp
//! and the set of active intents; it reads the result back through accessors
//! or a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid of settled cells and line clearing
//! - [`pieces`]: catalog matrices, geometric rotation and spawning
//! - [`collision`]: overlap tests against walls, floor and settled cells
//! - [`transform`]: collision-checked moves and rotations
//! - [`rng`]: seeded piece source (uniform or 7-bag)
//! - [`scoring`]: lock/line scores, levels and fall rates
//! - [`config`]: session configuration and validation
//! - [`engine`]: the session state machine and per-tick protocol
//! - [`snapshot`]: read-only state copies for observers
//!
//! # Game Rules
//!
//! - Pieces spawn centered on the top row; a spawn that does not fit ends the game
//! - Moves and rotations that would overlap are rejected, never kicked
//! - A piece locks on the tick its downward step would overlap
//! - Every lock scores `10 * level`; clears add `[0, 40, 100, 300, 1200][n] * level`
//! - Levels start at 1 and rise at configurable line thresholds
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameEngine};
//! use blockfall_core::types::{GameStatus, Intent, IntentSet};
//!
//! let mut engine = GameEngine::new(EngineConfig::default()).unwrap();
//! let x = engine.current_piece().unwrap().x;
//!
//! engine.tick(0, IntentSet::empty().with(Intent::MoveLeft));
//! assert_eq!(engine.current_piece().unwrap().x, x - 1);
//! assert_eq!(engine.status(), GameStatus::Running);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod transform;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{detect_collision, detect_collision_below, piece_collides};
pub use config::EngineConfig;
pub use engine::{GameEngine, LockEvent};
pub use error::{ConfigError, ShapeError};
pub use pieces::{canonical_matrix, random_piece, spawn_next_and_current, Matrix, Piece, PieceSnapshot};
pub use rng::{PieceSource, Randomizer, SimpleRng};
pub use scoring::{cleared_line_score, fall_rate_for_level, interval_ms, level_for_lines, piece_score};
pub use snapshot::GameSnapshot;
pub use transform::{move_down, move_left, move_right, rotate_left, rotate_right};
