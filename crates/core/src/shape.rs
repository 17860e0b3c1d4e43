//! Shape module - tetromino matrices and rotation
//!
//! A shape is a 4x4 matrix of cell states plus an anchor locating the matrix origin
//! on the board. Rotation rewrites the matrix in place; no wall kicks exist, the
//! board is responsible for nudging a rotated shape back inside the walls.
//!
//! Local coordinates: `matrix[row][col]`, row 0 on top. The edge queries report
//! offsets inside this 4x4 frame; add the anchor to get board coordinates.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{CellState, SHAPE_SIZE};

/// The 4x4 local frame of a shape
pub type ShapeMatrix = [[CellState; SHAPE_SIZE]; SHAPE_SIZE];

/// Board-space or local-space coordinate pair `(x, y)`
pub type BlockPos = (i16, i16);

/// Occupied cells of one shape (a 4x4 frame holds at most 16)
pub type Blocks = ArrayVec<BlockPos, { SHAPE_SIZE * SHAPE_SIZE }>;

/// The six catalog patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    J,
    Z,
    S,
}

impl ShapeKind {
    /// Every catalog entry, in catalog order
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    /// Unrotated pattern for this kind
    pub fn pattern(self) -> ShapeMatrix {
        let rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE] = match self {
            ShapeKind::I => [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
            ShapeKind::O => [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
            ShapeKind::T => [[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
            ShapeKind::J => [[0, 0, 0, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 1, 1, 0]],
            ShapeKind::Z => [[0, 0, 0, 0], [0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0]],
            ShapeKind::S => [[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0]],
        };
        rows.map(|row| row.map(CellState::from))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::J => "J",
            ShapeKind::Z => "Z",
            ShapeKind::S => "S",
        }
    }
}

/// One tetromino: catalog kind, current matrix, and board anchor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    x: i16,
    y: i16,
}

impl Shape {
    /// Create an unrotated shape of `kind` anchored at (0, 0)
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            matrix: kind.pattern(),
            x: 0,
            y: 0,
        }
    }

    /// Pick a catalog pattern and a rotation count (0..=3) uniformly at random.
    ///
    /// The anchor starts at (0, 0); the board positions the shape on spawn.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
        let turns = rng.random_range(0..4);
        let mut shape = Self::new(kind);
        for _ in 0..turns {
            shape.rotate();
        }
        shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn position(&self) -> BlockPos {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    /// Builder form of [`Shape::set_position`]
    pub fn at(mut self, x: i16, y: i16) -> Self {
        self.set_position(x, y);
        self
    }

    pub(crate) fn shift(&mut self, dx: i16, dy: i16) {
        self.x += dx;
        self.y += dy;
    }

    /// Whether the local cell (col, row) is full
    pub fn is_full_at(&self, col: usize, row: usize) -> bool {
        self.matrix
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|c| c.is_full())
    }

    /// Rotate 90° clockwise within the local frame: `new[i][j] = old[3-j][i]`.
    pub fn rotate(&mut self) {
        let old = self.matrix;
        for i in 0..SHAPE_SIZE {
            for j in 0..SHAPE_SIZE {
                self.matrix[i][j] = old[SHAPE_SIZE - 1 - j][i];
            }
        }
    }

    /// Column offset of the leftmost full cell.
    pub fn left_edge(&self) -> i16 {
        Self::edge((0..SHAPE_SIZE).find(|&col| self.column_has_block(col)))
    }

    /// Column offset of the rightmost full cell.
    pub fn right_edge(&self) -> i16 {
        Self::edge((0..SHAPE_SIZE).rev().find(|&col| self.column_has_block(col)))
    }

    /// Row offset of the lowest full cell.
    pub fn bottom_edge(&self) -> i16 {
        Self::edge((0..SHAPE_SIZE).rev().find(|&row| self.row_has_block(row)))
    }

    fn column_has_block(&self, col: usize) -> bool {
        self.matrix.iter().any(|row| row[col].is_full())
    }

    fn row_has_block(&self, row: usize) -> bool {
        self.matrix[row].iter().any(|c| c.is_full())
    }

    // Catalog patterns are never empty, so the fallback is unreachable for any
    // shape built through `new` or `random`.
    fn edge(found: Option<usize>) -> i16 {
        found.map_or(0, |offset| offset as i16)
    }

    /// Local offsets `(col, row)` of every full cell, row-major.
    pub fn occupied(&self) -> Blocks {
        let mut out = Blocks::new();
        for (row, cells) in self.matrix.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_full() {
                    out.push((col as i16, row as i16));
                }
            }
        }
        out
    }

    /// Board coordinates `(x, y)` of every full cell.
    pub fn blocks(&self) -> Blocks {
        self.occupied()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
