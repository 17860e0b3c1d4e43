//! Terminal: presents a framebuffer on the real terminal.
//!
//! Frames are diffed row by row against the previous one; only changed rows are
//! rewritten. A size change forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct Terminal {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    title: String,
    buf: Vec<u8>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            title: String::new(),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal to how `enter` found it.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Current terminal size, falling back to 80x24 when unknown
    pub fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }

    /// Force the next `present` to redraw everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Set the terminal window title; skipped when unchanged.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        if self.title == title {
            return Ok(());
        }
        self.title.clear();
        self.title.push_str(title);
        self.buf.clear();
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf()
    }

    /// Write the rows of `fb` that changed since the last call.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_rows_into(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;
        self.last = Some(fb.clone());
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of the rows of `next` that differ from `prev`; all rows without a usable `prev`.
pub fn changed_rows(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<u16> {
    let rows = 0..next.height();
    match prev {
        Some(prev) if same_size(prev, next) => {
            rows.filter(|&y| prev.row(y) != next.row(y)).collect()
        }
        _ => rows.collect(),
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Encode the changed rows of `next` as crossterm commands into `out`.
pub fn encode_rows_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    if !prev.is_some_and(|p| same_size(p, next)) {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<Style> = None;
    for y in changed_rows(prev, next) {
        out.queue(cursor::MoveTo(0, y))?;
        for glyph in next.row(y) {
            write_glyph(out, glyph, &mut current)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn write_glyph(out: &mut Vec<u8>, glyph: &Glyph, current: &mut Option<Style>) -> Result<()> {
    if *current != Some(glyph.style) {
        let style = glyph.style;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(to_color(style.fg)))?;
        out.queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *current = Some(style);
    }
    out.queue(Print(glyph.ch))?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_redraws_every_row() {
        let fb = FrameBuffer::new(3, 4);
        assert_eq!(changed_rows(None, &fb), vec![0, 1, 2, 3]);
    }

    #[test]
    fn only_changed_rows_are_listed() {
        let prev = FrameBuffer::new(5, 3);
        let mut next = prev.clone();
        next.put_char(4, 1, 'X', Style::default());
        assert_eq!(changed_rows(Some(&prev), &next), vec![1]);
    }

    #[test]
    fn size_change_redraws_everything() {
        let prev = FrameBuffer::new(5, 3);
        let next = FrameBuffer::new(6, 2);
        assert_eq!(changed_rows(Some(&prev), &next), vec![0, 1]);
    }

    #[test]
    fn encoding_contains_changed_text() {
        let prev = FrameBuffer::new(4, 2);
        let mut next = prev.clone();
        next.put_str(0, 1, "ab", Style::default());

        let mut out = Vec::new();
        encode_rows_into(Some(&prev), &next, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ab"));
    }

    #[test]
    fn unchanged_frame_encodes_no_glyphs() {
        let mut prev = FrameBuffer::new(4, 2);
        prev.put_str(0, 0, "zz", Style::default());
        let next = prev.clone();

        let mut out = Vec::new();
        encode_rows_into(Some(&prev), &next, &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("zz"));
    }
}
