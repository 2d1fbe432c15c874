//! Board module - manages the game grid
//!
//! The board is a W x H grid where each cell is empty or settled by a piece kind.
//! Uses a flat vector in row-major order; the size is fixed for the lifetime of
//! the board.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::error::ShapeError;
use crate::pieces::Piece;
use crate::types::{Cell, PieceKind};

/// The game board - `width` columns x `height` rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Parse a board from text rows, top row first.
    ///
    /// `.` or space is empty, a piece letter (`IOTSZJL`) is a settled cell of
    /// that kind and `#` is a settled cell of kind I.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, ShapeError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(ShapeError::Empty);
        }

        let mut board = Board::new(width as u16, rows.len() as u16);
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(ShapeError::Ragged {
                    row: y,
                    len,
                    expected: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    '#' => Some(PieceKind::I),
                    other => match PieceKind::from_str(&other.to_string()) {
                        Some(kind) => Some(kind),
                        None => {
                            return Err(ShapeError::BadGlyph {
                                ch: other,
                                row: y,
                                col: x,
                            })
                        }
                    },
                };
                board.set(x as i32, y as i32, cell);
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.is_inside_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u16 {
        self.height
    }

    /// True iff 0 <= x < width and 0 <= y < height
    pub fn is_inside_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled).
    ///
    /// Anything outside the grid reads as open; bounds are the collision
    /// detector's concern.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row, top row is 0
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on 0; an empty board simply has no rows.
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Write every occupied cell of `piece` into the grid.
    ///
    /// Overlapping settled cells is allowed (the final resting position before
    /// game over may overlap). Cells outside the grid, e.g. above the top, are
    /// dropped.
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.board_cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Indices of full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove all full rows, shift the rest down and refill the top with
    /// empty rows. Returns the number of rows removed.
    ///
    /// Uses a two-pointer compaction so several (even non-adjacent) full rows
    /// are handled in one pass without allocating.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                // This row is not full, move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Number of settled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board, keeping its size
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Render as text rows, the inverse of [`Board::from_ascii`]
    pub fn to_ascii(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        None => '.',
                        Some(kind) => kind.as_str().to_ascii_uppercase().chars().next().unwrap_or('#'),
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new(10, 20);

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        // Verify internal array
        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::from_ascii(&[
            "....", //
            "J...", //
            "####", //
            ".T..", //
            "####", //
        ])
        .unwrap();

        assert_eq!(board.full_rows(), vec![2, 4]);
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(
            board.to_ascii(),
            vec!["....", "....", "....", "J...", ".T.."]
        );
        assert_eq!(board.height(), 5);
    }

    #[test]
    fn test_from_ascii_roundtrip() {
        let rows = ["..O.", "SZ.L"];
        let board = Board::from_ascii(&rows).unwrap();
        assert_eq!(board.to_ascii(), rows.to_vec());
    }

    #[test]
    fn test_from_ascii_rejects_ragged_rows() {
        assert!(matches!(
            Board::from_ascii(&["...", ".."]),
            Err(ShapeError::Ragged { row: 1, len: 2, expected: 3 })
        ));
        assert!(matches!(
            Board::from_ascii(&["..x"]),
            Err(ShapeError::BadGlyph { ch: 'x', .. })
        ));
    }
}
