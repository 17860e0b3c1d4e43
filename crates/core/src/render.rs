//! Render surface interface
//!
//! The core never draws pixels or characters itself. Once per frame the controller
//! clears a [`RenderSurface`], hands it every block to draw in grid coordinates, and
//! sets the status caption. Row 0 is the top of the visible play area.

pub trait RenderSurface {
    /// Wipe the draw surface before a new frame.
    fn clear(&mut self);

    /// Draw one unit block at grid column `col`, row `row`.
    fn draw_block(&mut self, col: u16, row: u16);

    /// Replace the status caption.
    fn set_caption(&mut self, caption: &str);

    /// Draw one block of the next-shape preview at local offset `(dx, dy)`.
    fn draw_preview_block(&mut self, _dx: u16, _dy: u16) {}

    /// Show or hide the paused indicator.
    fn set_paused(&mut self, _paused: bool) {}
}

/// Surface that records what was drawn; handy for headless runs and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingSurface {
    pub blocks: Vec<(u16, u16)>,
    pub preview: Vec<(u16, u16)>,
    pub caption: String,
    pub paused: bool,
    pub clears: usize,
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.blocks.clear();
        self.preview.clear();
        self.clears += 1;
    }

    fn draw_block(&mut self, col: u16, row: u16) {
        self.blocks.push((col, row));
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption.clear();
        self.caption.push_str(caption);
    }

    fn draw_preview_block(&mut self, dx: u16, dy: u16) {
        self.preview.push((dx, dy));
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
