//! Pieces module - tetromino catalog, cell matrices and spawning
//!
//! Every kind has one canonical matrix in a tight bounding box. Rotations are
//! computed geometrically (a quarter turn of the bounding box), so the rotated
//! matrix has transposed dimensions. Nothing is pre-baked per rotation.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::error::ShapeError;
use crate::rng::PieceSource;
use crate::types::PieceKind;

/// Largest bounding box side supported by [`Matrix`]
pub const MAX_MATRIX_DIM: usize = 4;

/// Occupied cells of a matrix as (row, col) pairs, row-major order
pub type MatrixCells = ArrayVec<(u8, u8), { MAX_MATRIX_DIM * MAX_MATRIX_DIM }>;

/// Boolean cell matrix of a piece, at most 4x4.
///
/// Cells outside `width` x `height` are always empty, so two matrices compare
/// equal exactly when they describe the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_MATRIX_DIM]; MAX_MATRIX_DIM],
}

impl Matrix {
    const fn from_bits(width: u8, height: u8, bits: [[u8; MAX_MATRIX_DIM]; MAX_MATRIX_DIM]) -> Self {
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        let mut r = 0;
        while r < MAX_MATRIX_DIM {
            let mut c = 0;
            while c < MAX_MATRIX_DIM {
                cells[r][c] = bits[r][c] != 0 && r < height as usize && c < width as usize;
                c += 1;
            }
            r += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a matrix from rows of booleans.
    ///
    /// Rejects empty input, ragged rows and anything larger than 4x4.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if width > MAX_MATRIX_DIM || height > MAX_MATRIX_DIM {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: r,
                    len: row.len(),
                    expected: width,
                });
            }
            cells[r][..width].copy_from_slice(row);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Occupied cells as (row, col), without allocating.
    pub fn cells(&self) -> MatrixCells {
        let mut out = MatrixCells::new();
        for r in 0..self.height() {
            for c in 0..self.width() {
                if self.cells[r][c] {
                    out.push((r as u8, c as u8));
                }
            }
        }
        out
    }

    /// Rows as plain vectors (for snapshots and display)
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.height())
            .map(|r| self.cells[r][..self.width()].to_vec())
            .collect()
    }

    /// Quarter turn clockwise. Width and height swap.
    pub fn rotated_right(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Quarter turn counter-clockwise. Width and height swap.
    pub fn rotated_left(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[c][w - 1 - r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const I_MATRIX: Matrix = Matrix::from_bits(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_MATRIX: Matrix = Matrix::from_bits(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_MATRIX: Matrix = Matrix::from_bits(3, 2, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const S_MATRIX: Matrix = Matrix::from_bits(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_MATRIX: Matrix = Matrix::from_bits(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const J_MATRIX: Matrix = Matrix::from_bits(3, 2, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_MATRIX: Matrix = Matrix::from_bits(3, 2, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);

/// Canonical (spawn) matrix for a piece kind
pub fn canonical_matrix(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => I_MATRIX,
        PieceKind::O => O_MATRIX,
        PieceKind::T => T_MATRIX,
        PieceKind::S => S_MATRIX,
        PieceKind::Z => Z_MATRIX,
        PieceKind::J => J_MATRIX,
        PieceKind::L => L_MATRIX,
    }
}

/// A piece value: kind, current matrix and top-left offset on the board.
///
/// Pieces are `Copy`; every move or rotation yields a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Piece with the canonical matrix at the origin
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            matrix: canonical_matrix(kind),
            x: 0,
            y: 0,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Board coordinates (x, y) of every occupied cell
    pub fn board_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .cells()
            .into_iter()
            .map(move |(r, c)| (self.x + c as i32, self.y + r as i32))
    }
}

/// Read-only view of a piece for observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub matrix: Vec<Vec<bool>>,
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
            matrix: piece.matrix.to_rows(),
        }
    }
}

/// Uniform (or bag) draw of a fresh piece at the origin
pub fn random_piece(source: &mut PieceSource) -> Piece {
    Piece::new(source.draw())
}

/// Result of [`spawn_next_and_current`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedPieces {
    pub current: Piece,
    pub next: Piece,
}

/// Promote the queued piece (or draw one if nothing is queued), center it
/// horizontally on a board of `board_width` columns and draw a new next piece.
///
/// Only the piece source advances; callers decide what to do with the pair.
pub fn spawn_next_and_current(
    queued: Option<Piece>,
    board_width: u16,
    source: &mut PieceSource,
) -> SpawnedPieces {
    let promoted = queued.unwrap_or_else(|| random_piece(source));
    let x = (board_width as i32 - promoted.matrix.width() as i32).div_euclid(2);
    let current = promoted.at(x, 0);
    let next = random_piece(source);
    SpawnedPieces { current, next }
}
