//! TerminalRenderer: flushes a surface to a real terminal.
//!
//! Draws are diffed against the previously flushed surface so an
//! unchanged board costs almost nothing per frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::surface::{Cell, Rgb, Surface, Weight};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Surface>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

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

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, surface: &Surface) -> Result<()> {
        self.buf.clear();

        match &self.last {
            Some(prev)
                if prev.width() == surface.width() && prev.height() == surface.height() =>
            {
                encode_diff_into(prev, surface, &mut self.buf)?;
            }
            // First frame, or the viewport changed size.
            _ => encode_full_into(surface, &mut self.buf)?,
        }
        self.flush_buf()?;

        match &mut self.last {
            Some(prev) => prev.clone_from(surface),
            None => self.last = Some(surface.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the last emitted style so runs of equally styled cells only
/// pay for their glyphs.
struct StyleRun(Option<(Rgb, Rgb, Weight)>);

impl StyleRun {
    fn new() -> Self {
        Self(None)
    }

    fn emit(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        let style = (cell.fg, cell.bg, cell.weight);
        if self.0 != Some(style) {
            out.queue(SetForegroundColor(rgb_to_color(cell.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(cell.bg)))?;
            out.queue(SetAttribute(Attribute::Reset))?;
            match cell.weight {
                Weight::Normal => {}
                Weight::Bold => {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                Weight::Dim => {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
            }
            self.0 = Some(style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(surface: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut run = StyleRun::new();
    for (y, row) in surface.rows().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for &cell in row {
            run.emit(out, cell)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the cells that changed between two equally sized
/// surfaces.
pub fn encode_diff_into(prev: &Surface, next: &Surface, out: &mut Vec<u8>) -> Result<()> {
    let mut run = StyleRun::new();

    for (y, (prev_row, next_row)) in prev.rows().zip(next.rows()).enumerate() {
        let mut x = 0;
        while x < next_row.len() {
            if prev_row[x] == next_row[x] {
                x += 1;
                continue;
            }

            // Emit the whole changed stretch from one cursor move.
            out.queue(cursor::MoveTo(x as u16, y as u16))?;
            while x < next_row.len() && prev_row[x] != next_row[x] {
                run.emit(out, next_row[x])?;
                x += 1;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}
