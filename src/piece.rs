//! Piece catalog, shapes, and the random piece generator.
//!
//! Shapes are stored as small row-major boolean matrices (at most 4×4) whose
//! top-left corner sits at the piece's `(x, y)` offset on the board.

use crate::config::{SPAWN_X, SPAWN_Y};
use crate::error::GameError;

/// Largest edge of any catalog shape.
pub const MAX_SHAPE: usize = 4;

/// Fill colors used for pieces (soft pastel palette).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    LightBlue,
    SkyBlue,
    LightSalmon,
    LightYellow,
    PaleGreen,
    Plum,
    LightPink,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::LightBlue,
        Color::SkyBlue,
        Color::LightSalmon,
        Color::LightYellow,
        Color::PaleGreen,
        Color::Plum,
        Color::LightPink,
    ];

    /// CSS color used as the canvas fill style.
    pub fn css(self) -> &'static str {
        match self {
            Color::LightBlue => "#ADD8E6",
            Color::SkyBlue => "#87CEEB",
            Color::LightSalmon => "#FFA07A",
            Color::LightYellow => "#FFFFE0",
            Color::PaleGreen => "#98FB98",
            Color::Plum => "#DDA0DD",
            Color::LightPink => "#FFB6C1",
        }
    }
}

/// The seven catalog shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    I,
    T,
    Z,
    S,
    O,
    L,
    J,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Spawn orientation of this shape.
    pub fn shape(self) -> Shape {
        match self {
            ShapeKind::I => Shape::from_grid([[1, 1, 1, 1]]),
            ShapeKind::T => Shape::from_grid([[1, 1, 1], [0, 1, 0]]),
            ShapeKind::Z => Shape::from_grid([[1, 1, 0], [0, 1, 1]]),
            ShapeKind::S => Shape::from_grid([[0, 1, 1], [1, 1, 0]]),
            ShapeKind::O => Shape::from_grid([[1, 1], [1, 1]]),
            ShapeKind::L => Shape::from_grid([[1, 1, 1], [1, 0, 0]]),
            ShapeKind::J => Shape::from_grid([[1, 1, 1], [0, 0, 1]]),
        }
    }
}

/// Boolean occupancy matrix of a piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE]; MAX_SHAPE], // [row][col]; only width×height is meaningful
}

impl Shape {
    /// Build a shape from rows of 0/1 values. Returns `None` when the rows
    /// are ragged or the matrix does not fit in `MAX_SHAPE`×`MAX_SHAPE`.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if height > MAX_SHAPE || width > MAX_SHAPE || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (y, row) in rows.iter().enumerate() {
            for (x, v) in row.iter().enumerate() {
                cells[y][x] = *v != 0;
            }
        }
        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Catalog constructor; the size bound is checked at compile time.
    fn from_grid<const W: usize, const H: usize>(grid: [[u8; W]; H]) -> Self {
        const { assert!(W <= MAX_SHAPE && H <= MAX_SHAPE) };
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (y, row) in grid.iter().enumerate() {
            for (x, v) in row.iter().enumerate() {
                cells[y][x] = *v != 0;
            }
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Offsets `(dx, dy)` of the occupied cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.cells[y][x])
    }

    /// Quarter turn clockwise: transpose, then reverse each new row, so
    /// `new[i][j] = old[h - 1 - j][i]`.
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| if self.cells[y][x] { '#' } else { '.' })
                    .collect()
            })
            .collect();
        f.debug_tuple("Shape").field(&rows.join("/")).finish()
    }
}

/// The falling piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece in spawn orientation at the spawn offset.
    pub fn spawn(kind: ShapeKind, color: Color) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

/// Uniform, independent draws of shape and color for every spawn.
pub struct PieceGenerator {
    rng: fastrand::Rng,
}

impl PieceGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Seed from the platform entropy source (`crypto.getRandomValues` in the
    /// browser).
    pub fn from_entropy() -> Result<Self, GameError> {
        let mut seed = [0u8; 8];
        getrandom::getrandom(&mut seed)?;
        Ok(Self::with_seed(u64::from_le_bytes(seed)))
    }

    pub fn next_piece(&mut self) -> Piece {
        let kind = ShapeKind::ALL[self.rng.usize(..ShapeKind::ALL.len())];
        let color = Color::ALL[self.rng.usize(..Color::ALL.len())];
        Piece::spawn(kind, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_matches_cell_counts() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.shape().filled().count(), 4, "{kind:?}");
        }
        assert_eq!(ShapeKind::I.shape().width(), 4);
        assert_eq!(ShapeKind::I.shape().height(), 1);
        assert_eq!(ShapeKind::O.shape().width(), 2);
    }

    #[test]
    fn rotate_t_clockwise() {
        // ###      #.
        // .#.  ->  ##
        //          #.
        let r = ShapeKind::T.shape().rotated();
        assert_eq!(Some(r), Shape::from_rows(&[&[0, 1], &[1, 1], &[0, 1]]));
    }

    #[test]
    fn rotate_l_clockwise() {
        let r = ShapeKind::L.shape().rotated();
        assert_eq!(Some(r), Shape::from_rows(&[&[1, 1], &[0, 1], &[0, 1]]));
    }

    #[test]
    fn from_rows_rejects_bad_matrices() {
        assert_eq!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]), None);
        assert_eq!(Shape::from_rows(&[&[1], &[1], &[1], &[1], &[1]]), None);
        assert_eq!(Shape::from_rows(&[&[1, 1], &[1]]), None);
        let empty = Shape::from_rows(&[]).unwrap();
        assert_eq!(empty.filled().count(), 0);
    }

    #[test]
    fn rotate_bar_becomes_vertical() {
        let r = ShapeKind::I.shape().rotated();
        assert_eq!((r.width(), r.height()), (1, 4));
        assert!((0..4).all(|y| r.is_filled(0, y)));
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let s = kind.shape();
            assert_eq!(s.rotated().rotated().rotated().rotated(), s, "{kind:?}");
        }
    }

    #[test]
    fn piece_cells_follow_offset() {
        let p = Piece::spawn(ShapeKind::O, Color::Plum).shifted(1, 2);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(4, 2), (5, 2), (4, 3), (5, 3)]);
    }

    #[test]
    fn generator_spawns_at_start_offset() {
        let mut g = PieceGenerator::with_seed(42);
        for _ in 0..50 {
            let p = g.next_piece();
            assert_eq!((p.x, p.y), (SPAWN_X, SPAWN_Y));
            assert_eq!(p.shape, p.kind.shape());
        }
    }

    #[test]
    fn generator_covers_catalog_and_palette() {
        let mut g = PieceGenerator::with_seed(7);
        let mut kinds = HashSet::new();
        let mut colors = HashSet::new();
        for _ in 0..1000 {
            let p = g.next_piece();
            kinds.insert(p.kind);
            colors.insert(p.color);
        }
        assert_eq!(kinds.len(), ShapeKind::ALL.len());
        assert_eq!(colors.len(), Color::ALL.len());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PieceGenerator::with_seed(99);
        let mut b = PieceGenerator::with_seed(99);
        for _ in 0..20 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }

    #[test]
    fn entropy_seeding_works_natively() {
        assert!(PieceGenerator::from_entropy().is_ok());
    }
}
