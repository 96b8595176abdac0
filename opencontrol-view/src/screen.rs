//! Screen buffer
//!
//! Character buffer sized for a 128x64 panel with a 6x8 cell.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns
pub const SCREEN_COLS: usize = 21;

/// Text screen with per-row highlights
///
/// Every mutation that changes content marks the screen dirty;
/// [`Screen::render`] clears the flag once the backend accepted a flush.
#[derive(Clone)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Inverted column range per row (start, end exclusive)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear text and highlights
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.dirty = true;
    }

    /// Replace a row's text, truncated to the screen width
    ///
    /// Out-of-range rows are ignored. Writing identical text leaves the
    /// dirty flag alone.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let end = text
            .char_indices()
            .nth(SCREEN_COLS)
            .map_or(text.len(), |(i, _)| i);
        let text = &text[..end];
        if line.as_str() == text {
            return;
        }

        line.clear();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set or clear the inverted region of a row
    pub fn set_highlight(&mut self, row: usize, region: Option<(u8, u8)>) {
        if let Some(highlight) = self.highlights.get_mut(row) {
            if *highlight != region {
                *highlight = region;
                self.dirty = true;
            }
        }
    }

    pub fn highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Draw the whole screen to `display` and flush it
    ///
    /// The dirty flag is only cleared when every call succeeded, so a
    /// failed frame is retried on the next render.
    pub fn render<D: DisplayBackend + ?Sized>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        display.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                display.draw_text(row as u8, 0, line)?;
            }
            if let Some((start, end)) = self.highlights[row] {
                display.invert_region(row as u8, start, end)?;
            }
        }
        display.flush()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
