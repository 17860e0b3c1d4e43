//! BoardCanvas: a [`RenderSurface`] that draws into a terminal framebuffer.
//!
//! This module is pure (no I/O). The controller drives it through the surface
//! interface; the result is handed to [`Terminal`](crate::Terminal) for display.
//!
//! Layout: the bordered play area, a caption line right under it, and a NEXT preview
//! to the right when the viewport is wide enough.

use crate::core::RenderSurface;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const EMPTY: Style = Style::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
const BLOCK: Style = Style::new(Rgb::new(80, 220, 220), PLAY_BG).bold();
const PREVIEW: Style = Style::new(Rgb::new(240, 220, 80), Rgb::new(0, 0, 0));
const LABEL: Style = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const CAPTION: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: Style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

pub const BLOCK_CHAR: char = '█';
pub const EMPTY_CHAR: char = '·';

/// Gap between the play-area frame and the preview panel
const PANEL_GAP: u16 = 2;

/// Draws one board into a reusable framebuffer.
#[derive(Debug, Clone)]
pub struct BoardCanvas {
    board_w: u16,
    board_h: u16,
    /// Terminal columns per board cell
    cell_w: u16,
    /// Terminal rows per board cell
    cell_h: u16,
    anchor_y: AnchorY,
    viewport: Viewport,
    origin: (u16, u16),
    fb: FrameBuffer,
    caption: String,
}

impl BoardCanvas {
    /// Canvas for a `board_w x board_h` board, 2x1 terminal cells per board cell.
    pub fn new(board_w: u16, board_h: u16) -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::with_cell_size(board_w, board_h, 2, 1)
    }

    pub fn with_cell_size(board_w: u16, board_h: u16, cell_w: u16, cell_h: u16) -> Self {
        let mut canvas = Self {
            board_w,
            board_h,
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            viewport: Viewport::new(0, 0),
            origin: (0, 0),
            fb: FrameBuffer::new(0, 0),
            caption: String::new(),
        };
        let (w, h) = canvas.min_size();
        canvas.viewport = Viewport::new(w, h);
        canvas
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Smallest viewport showing the framed board and its caption line.
    pub fn min_size(&self) -> (u16, u16) {
        (self.frame_w(), self.frame_h() + 1)
    }

    /// Viewport used from the next `clear` on.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Caption drawn in the current frame
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Top-left corner of the play-area frame in the current frame
    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    fn frame_w(&self) -> u16 {
        self.board_w.saturating_mul(self.cell_w).saturating_add(2)
    }

    fn frame_h(&self) -> u16 {
        self.board_h.saturating_mul(self.cell_h).saturating_add(2)
    }

    /// Framebuffer position of the top-left character of board cell (col, row)
    pub fn cell_origin(&self, col: u16, row: u16) -> (u16, u16) {
        (
            self.origin.0 + 1 + col * self.cell_w,
            self.origin.1 + 1 + row * self.cell_h,
        )
    }

    fn panel_x(&self) -> u16 {
        self.origin.0 + self.frame_w() + PANEL_GAP
    }

    fn fill_cell(&mut self, col: u16, row: u16, ch: char, style: Style) {
        let (x, y) = self.cell_origin(col, row);
        self.fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_border(&mut self) {
        let (x, y) = self.origin;
        let (w, h) = (self.frame_w(), self.frame_h());

        self.fb.put_char(x, y, '┌', BORDER);
        self.fb.put_char(x + w - 1, y, '┐', BORDER);
        self.fb.put_char(x, y + h - 1, '└', BORDER);
        self.fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            self.fb.put_char(x + dx, y, '─', BORDER);
            self.fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            self.fb.put_char(x, y + dy, '│', BORDER);
            self.fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_overlay(&mut self, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = self.origin.0 + self.frame_w().saturating_sub(text_w) / 2;
        let y = self.origin.1 + self.frame_h() / 2;
        self.fb.put_str(x, y, text, OVERLAY);
    }
}

impl RenderSurface for BoardCanvas {
    fn clear(&mut self) {
        let vp = self.viewport;
        self.fb.resize(vp.width, vp.height);
        self.fb.fill(Glyph::default());
        self.caption.clear();

        let (total_w, total_h) = self.min_size();
        let x = vp.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => vp.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        self.origin = (x, y);

        self.draw_border();
        for row in 0..self.board_h {
            for col in 0..self.board_w {
                self.fill_cell(col, row, EMPTY_CHAR, EMPTY);
            }
        }

        let panel_x = self.panel_x();
        self.fb.put_str(panel_x, y, "NEXT", LABEL);
    }

    fn draw_block(&mut self, col: u16, row: u16) {
        if col < self.board_w && row < self.board_h {
            self.fill_cell(col, row, BLOCK_CHAR, BLOCK);
        }
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption.clear();
        self.caption.push_str(caption);
        let (x, y) = self.origin;
        self.fb.put_str(x, y + self.frame_h(), caption, CAPTION);
    }

    fn draw_preview_block(&mut self, dx: u16, dy: u16) {
        let x = self.panel_x() + dx * self.cell_w;
        let y = self.origin.1 + 2 + dy * self.cell_h;
        self.fb.fill_rect(x, y, self.cell_w, self.cell_h, BLOCK_CHAR, PREVIEW);
    }

    fn set_paused(&mut self, paused: bool) {
        if paused {
            self.draw_overlay("PAUSED");
        }
    }
}
