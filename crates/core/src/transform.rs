//! Piece transforms - translated or rotated copies of a piece.
//!
//! Lateral moves and rotations reject themselves: when the result would
//! collide, the original piece is returned unchanged. Rotation keeps the
//! top-left offset and performs no wall-kick search, so turning against a
//! wall or the stack may simply fail.
//!
//! `move_down` does not check anything. The engine moves first and resolves
//! the overlap afterwards (revert one row and lock).

use crate::board::Board;
use crate::collision::detect_collision;
use crate::pieces::{Matrix, Piece};

fn shifted(piece: Piece, board: &Board, dx: i32) -> Piece {
    let x = piece.x + dx;
    if detect_collision(board, &piece.matrix, x, piece.y) {
        piece
    } else {
        Piece { x, ..piece }
    }
}

fn turned(piece: Piece, board: &Board, matrix: Matrix) -> Piece {
    if detect_collision(board, &matrix, piece.x, piece.y) {
        piece
    } else {
        Piece { matrix, ..piece }
    }
}

pub fn move_left(piece: Piece, board: &Board) -> Piece {
    shifted(piece, board, -1)
}

pub fn move_right(piece: Piece, board: &Board) -> Piece {
    shifted(piece, board, 1)
}

/// One row down, unchecked
pub fn move_down(piece: Piece) -> Piece {
    Piece {
        y: piece.y + 1,
        ..piece
    }
}

/// Counter-clockwise quarter turn, if it fits
pub fn rotate_left(piece: Piece, board: &Board) -> Piece {
    turned(piece, board, piece.matrix.rotated_left())
}

/// Clockwise quarter turn, if it fits
pub fn rotate_right(piece: Piece, board: &Board) -> Piece {
    turned(piece, board, piece.matrix.rotated_right())
}
