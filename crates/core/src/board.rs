//! Board module - grid, active/pending shapes, movement and line clears
//!
//! The board is a `width x height` grid where each cell is empty or full. Full cells
//! only appear by locking a shape and only disappear by line removal.
//! Uses a flat row-major array; coordinates are `(x, y)` with `y` growing downward
//! and row 0 at the top.
//!
//! New shapes spawn centered on `width / 2` at row -1, one row above the visible
//! top. Cells above the top never collide, so a shape may hang partly off-screen.

use std::fmt;

use crate::config::MAX_BOARD_SIDE;
use crate::events::{self, ListenerHandle};
use crate::render::RenderSurface;
use crate::rng::{seeded, ShapeRng};
use crate::shape::{Blocks, Shape, ShapeKind};
use crate::types::{
    BoardEvent, CellState, Direction, BOARD_HEIGHT, BOARD_WIDTH, SHAPE_SIZE, SPAWN_ROW,
};

/// The playfield with its falling and upcoming shapes
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<CellState>,
    active: Shape,
    pending: Shape,
    rng: ShapeRng,
    listeners: Vec<ListenerHandle>,
}

impl Board {
    /// Create a board and spawn the first shape, drawing shapes from `seed`.
    pub fn new(width: u16, height: u16, seed: u64) -> Self {
        Self::with_rng(width, height, seeded(seed))
    }

    /// Create a board drawing shapes from an existing generator.
    ///
    /// Each side must be at most [`MAX_BOARD_SIDE`] cells; coordinates are `i16`.
    pub fn with_rng(width: u16, height: u16, rng: ShapeRng) -> Self {
        debug_assert!(
            width <= MAX_BOARD_SIDE && height <= MAX_BOARD_SIDE,
            "board {}x{} exceeds {} cells per side",
            width,
            height,
            MAX_BOARD_SIDE
        );
        // Placeholders; `reset` draws the real shapes.
        let mut board = Self {
            width,
            height,
            cells: vec![CellState::Empty; width as usize * height as usize],
            active: Shape::new(ShapeKind::I),
            pending: Shape::new(ShapeKind::I),
            rng,
            listeners: Vec::new(),
        };
        board.reset();
        board
    }

    /// Register a listener for lines-cleared and game-over events.
    pub fn subscribe(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&self, event: BoardEvent) {
        events::dispatch(&self.listeners, event);
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y); `None` outside the grid
    pub fn get(&self, x: i16, y: i16) -> Option<CellState> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false outside the grid
    pub fn set(&mut self, x: i16, y: i16, cell: CellState) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is inside the grid and full
    pub fn is_full(&self, x: i16, y: i16) -> bool {
        self.get(x, y).is_some_and(CellState::is_full)
    }

    pub fn is_row_full(&self, y: u16) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|c| c.is_full())
    }

    fn row(&self, y: u16) -> &[CellState] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.cells[start..start + width]
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Empty every cell without touching the shapes
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    pub fn active_shape(&self) -> &Shape {
        &self.active
    }

    pub fn pending_shape(&self) -> &Shape {
        &self.pending
    }

    /// Replace the falling shape as-is, without spawn positioning or checks.
    pub fn set_active_shape(&mut self, shape: Shape) {
        self.active = shape;
    }

    /// Replace the shape that spawns next.
    pub fn set_pending_shape(&mut self, shape: Shape) {
        self.pending = shape;
    }

    /// Empty the grid, draw a new pending shape and spawn it.
    pub fn reset(&mut self) {
        self.clear();
        self.pending = Shape::random(&mut self.rng);
        self.add_shape();
    }

    /// Promote the pending shape to active and draw a new pending one.
    ///
    /// The active shape is centered so its left edge sits on `width / 2` and placed at
    /// row -1. If it collides right away there is no room left: the board resets and
    /// a game-over event is emitted. Returns false in that case.
    pub fn add_shape(&mut self) -> bool {
        let mut active = self.pending.clone();
        let x = (self.width / 2) as i16 - active.left_edge();
        active.set_position(x, SPAWN_ROW);
        self.active = active;
        self.pending = Shape::random(&mut self.rng);
        log::debug!(
            "spawned {} at ({}, {}), next {}",
            self.active.kind().as_str(),
            x,
            SPAWN_ROW,
            self.pending.kind().as_str()
        );

        if self.is_collision() {
            log::info!("no room to spawn {}; game over", self.active.kind().as_str());
            self.reset();
            self.emit(BoardEvent::GameOver);
            return false;
        }
        true
    }

    /// Rotate the active shape clockwise, nudging it back inside the side walls.
    ///
    /// Rejected (returns false, nothing changes) when the rotated shape would reach
    /// past the bottom row or overlap full cells.
    pub fn rotate_shape(&mut self) -> bool {
        let mut rotated = self.active.clone();
        rotated.rotate();

        let left = rotated.x() + rotated.left_edge();
        let right = rotated.x() + rotated.right_edge();
        if left < 0 {
            rotated.set_position(-rotated.left_edge(), rotated.y());
        } else if right >= self.width as i16 {
            rotated.set_position(self.width as i16 - rotated.right_edge() - 1, rotated.y());
        }

        if self.check_bottom_shape(&rotated) {
            log::debug!("rotation rejected: past bottom row");
            return false;
        }
        if self.is_collision_shape(&rotated) {
            log::debug!("rotation rejected: blocked");
            return false;
        }

        self.active = rotated;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i16) -> bool {
        self.active.shift(dx, 0);
        if self.out_of_bounds() || self.is_collision() {
            self.active.shift(-dx, 0);
            return false;
        }
        true
    }

    /// Move the active shape one row down.
    ///
    /// When it cannot move the shape is locked, the next one spawns, and false is
    /// returned.
    pub fn move_down(&mut self) -> bool {
        self.active.shift(0, 1);
        if self.check_bottom() || self.is_collision() {
            self.active.shift(0, -1);
            self.shape_to_board();
            self.add_shape();
            return false;
        }
        true
    }

    pub fn move_piece(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.rotate_shape(),
            Direction::Down => self.move_down(),
        }
    }

    /// Whether the active shape pokes out of the side walls
    pub fn out_of_bounds(&self) -> bool {
        self.out_of_bounds_shape(&self.active)
    }

    pub fn out_of_bounds_shape(&self, shape: &Shape) -> bool {
        shape.x() + shape.left_edge() < 0 || shape.x() + shape.right_edge() >= self.width as i16
    }

    /// Whether the active shape reaches the bottom row or below
    pub fn check_bottom(&self) -> bool {
        self.check_bottom_shape(&self.active)
    }

    pub fn check_bottom_shape(&self, shape: &Shape) -> bool {
        shape.y() + shape.bottom_edge() >= self.height as i16
    }

    /// Whether the active shape overlaps a full cell
    pub fn is_collision(&self) -> bool {
        self.is_collision_shape(&self.active)
    }

    /// Whether any full cell of `shape` sits on a full grid cell.
    ///
    /// Cells above the top row are skipped regardless of grid contents.
    pub fn is_collision_shape(&self, shape: &Shape) -> bool {
        for row in 0..SHAPE_SIZE {
            let y = shape.y() + row as i16;
            if y < 0 {
                continue;
            }
            for col in 0..SHAPE_SIZE {
                if shape.is_full_at(col, row) && self.is_full(shape.x() + col as i16, y) {
                    return true;
                }
            }
        }
        false
    }

    /// Remove the lowest full row, if any.
    ///
    /// Scans bottom to top and stops after the first full row.
    pub fn test_for_line(&mut self) -> bool {
        for y in (0..self.height).rev() {
            if self.is_row_full(y) {
                self.process_line(y);
                return true;
            }
        }
        false
    }

    /// Drop every row above `y` down by one and empty the top row.
    pub fn process_line(&mut self, y: u16) {
        if y >= self.height {
            return;
        }
        let width = self.width as usize;
        for row in (1..=y as usize).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }
        self.cells[..width].fill(CellState::Empty);
    }

    /// Lock the active shape into the grid and remove every full row.
    ///
    /// Emits one lines-cleared event carrying the total when anything was removed.
    /// Cells above the top row are dropped. Returns the number of rows removed.
    pub fn shape_to_board(&mut self) -> u32 {
        for (x, y) in self.active.blocks() {
            self.set(x, y, CellState::Full);
        }

        let mut count = 0;
        while self.test_for_line() {
            count += 1;
        }
        if count > 0 {
            log::debug!("cleared {} line(s)", count);
            self.emit(BoardEvent::LinesCleared(count));
        }
        count
    }

    /// Coordinates of every full grid cell, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_full())
            .map(move |(i, _)| ((i % width) as u16, (i / width) as u16))
    }

    /// Board coordinates of the active shape's cells that are inside the grid
    pub fn active_blocks(&self) -> Blocks {
        self.active
            .blocks()
            .into_iter()
            .filter(|&(x, y)| self.index(x, y).is_some())
            .collect()
    }

    /// Draw locked cells, then the active shape.
    pub fn draw_game_board<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (x, y) in self.filled_cells() {
            surface.draw_block(x, y);
        }
        for (x, y) in self.active_blocks() {
            surface.draw_block(x as u16, y as u16);
        }
    }

    /// Draw the pending shape through the surface's preview hook.
    pub fn draw_preview<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (dx, dy) in self.pending.occupied() {
            surface.draw_preview_block(dx as u16, dy as u16);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT, 1)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("filled", &self.filled_cells().count())
            .field("active", &self.active)
            .field("pending", &self.pending)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
