//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

/// Number of character rows on the 1602 LCD
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the 1602 LCD
pub const SCREEN_COLS: usize = 16;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Fixed-capacity line of text
pub type Line = String<LINE_LEN>;

/// Screen buffer for text-mode displays
///
/// Tracks per row whether the content changed since it was last pushed to
/// the hardware, so unchanged rows cost no bus traffic.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    /// Current display content
    lines: [Line; SCREEN_ROWS],
    /// Rows that need to be redrawn
    dirty: [bool; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
            dirty: [true; SCREEN_ROWS],
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for row in 0..SCREEN_ROWS {
            self.set_line(row, "");
        }
    }

    /// Set the content of a specific row
    ///
    /// Text longer than a row is truncated. Writing the same text again
    /// leaves the screen clean.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let text = truncate(text, LINE_LEN);
        if line.as_str() == text {
            return;
        }
        line.clear();
        let _ = line.push_str(text);
        self.dirty[row] = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if any row needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|d| *d)
    }

    /// Check if a specific row needs redrawing
    pub fn is_row_dirty(&self, row: usize) -> bool {
        self.dirty.get(row).copied().unwrap_or(false)
    }

    /// Mark one row as pushed to the hardware
    pub fn mark_row_clean(&mut self, row: usize) {
        if let Some(d) = self.dirty.get_mut(row) {
            *d = false;
        }
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = [false; SCREEN_ROWS];
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = [true; SCREEN_ROWS];
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

/// Cut `text` to at most `max` bytes on a character boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, " | ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
