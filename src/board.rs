//! Board model: the grid of landed cells.
//!
//! Coordinates are `(x, y)` with `x` in `0..COLS` left to right and `y` in
//! `0..ROWS` top to bottom. Pieces may hang above the top edge (`y < 0`); that
//! region is never treated as a collision.

use crate::config::{COLS, ROWS};
use crate::piece::{Color, Piece};

/// A cell is empty or holds the color of the piece that landed there.
pub type Cell = Option<Color>;
pub type Row = [Cell; COLS];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [[None; COLS]; ROWS],
        }
    }

    /// Build a board from an explicit set of rows (top to bottom).
    pub fn from_rows(rows: [Row; ROWS]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row; ROWS] {
        &self.rows
    }

    /// `None` when `(x, y)` is off the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = Self::index(x, y)?;
        Some(self.rows[y][x])
    }

    /// Returns false when `(x, y)` is off the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= COLS as i32 || y >= ROWS as i32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Occupied cells of the grid with their positions.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|c| (x, y, c)))
        })
    }

    pub fn is_collision(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            if x < 0 || x >= COLS as i32 || y >= ROWS as i32 {
                return true;
            }
            // above the visible top
            if y < 0 {
                return false;
            }
            self.rows[y as usize][x as usize].is_some()
        })
    }

    /// Commit the piece's cells into the grid. Cells off the grid are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    pub fn is_row_full(row: &Row) -> bool {
        row.iter().all(Option::is_some)
    }

    /// Remove full rows and pad with empty rows on top. Returns the number of
    /// rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let kept: Vec<Row> = self
            .rows
            .iter()
            .filter(|row| !Self::is_row_full(row))
            .copied()
            .collect();
        let cleared = ROWS - kept.len();
        if cleared == 0 {
            return 0;
        }
        let mut rows = [[None; COLS]; ROWS];
        rows[cleared..].copy_from_slice(&kept);
        self.rows = rows;
        cleared
    }
}
