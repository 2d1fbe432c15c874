//! Error types for the simulation core.
//!
//! Gameplay outcomes (rejected moves, line clears, game over) are ordinary
//! state transitions and never show up here. These errors only cover inputs
//! that cannot describe a valid session.

use std::path::PathBuf;

use thiserror::Error;

/// A piece matrix or ASCII board description that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// No rows, or rows with no columns
    #[error("shape has no cells")]
    Empty,

    /// Rows of differing length
    #[error("row {row} has {len} columns, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    /// Piece matrices are limited to a 4x4 bounding box
    #[error("shape is {width}x{height}, larger than the 4x4 limit")]
    TooLarge { width: usize, height: usize },

    /// Unknown glyph in an ASCII board
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    BadGlyph { ch: char, row: usize, col: usize },
}

/// Invalid session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid board size {width}x{height} (width must be at least {min_width}, height at least 1)")]
    InvalidBoardSize {
        width: u16,
        height: u16,
        min_width: u16,
    },

    #[error("{name} must be a finite positive rate, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("fall_rates must contain at least one level")]
    EmptyFallRates,

    #[error("fall_rates must be non-decreasing (entry {index} is slower than the one before it)")]
    DecreasingFallRates { index: usize },

    #[error("level_thresholds must be strictly increasing (entry {index})")]
    UnorderedLevelThresholds { index: usize },

    #[error("board is {actual_width}x{actual_height}, config expects {width}x{height}")]
    BoardMismatch {
        width: u16,
        height: u16,
        actual_width: u16,
        actual_height: u16,
    },

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
