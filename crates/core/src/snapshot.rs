//! Read-only copy of the observable session state, for renderers and tests.

use serde::Serialize;

use crate::pieces::PieceSnapshot;
use crate::types::{Cell, GameStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Settled cells, row-major
    pub cells: Vec<Cell>,
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    /// Resting row of the current piece
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_rate: f64,
    pub status: GameStatus,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            current: None,
            next: None,
            ghost_y: None,
            score: 0,
            lines: 0,
            level: 0,
            fall_rate: 0.0,
            status: GameStatus::Running,
        }
    }
}

impl GameSnapshot {
    /// Settled cell at (x, y); `None` for empty or out of range
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}
