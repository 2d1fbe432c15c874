//! Collision detection - pure checks of a matrix at an offset against a board.
//!
//! Rules for every occupied matrix cell mapped to board (bx, by):
//! - bx outside [0, width) collides
//! - by >= height collides
//! - by >= 0 on a settled cell collides
//!
//! Cells above the top edge (by < 0) never collide, so pieces can spawn partly
//! above the visible grid and fall into view.

use crate::board::Board;
use crate::pieces::{Matrix, Piece};

/// Does `matrix` placed with its top-left at (x, y) overlap walls, the floor
/// or settled cells?
pub fn detect_collision(board: &Board, matrix: &Matrix, x: i32, y: i32) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;

    matrix.cells().iter().any(|&(r, c)| {
        let bx = x + c as i32;
        let by = y + r as i32;
        bx < 0 || bx >= width || by >= height || (by >= 0 && board.is_occupied(bx, by))
    })
}

/// Collision of a piece at its own position
pub fn piece_collides(board: &Board, piece: &Piece) -> bool {
    detect_collision(board, &piece.matrix, piece.x, piece.y)
}

/// Would the piece collide one row further down? (i.e. it cannot fall)
pub fn detect_collision_below(board: &Board, piece: &Piece) -> bool {
    detect_collision(board, &piece.matrix, piece.x, piece.y + 1)
}
