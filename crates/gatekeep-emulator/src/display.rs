//! Virtual character LCD for the entryway.
//!
//! This module provides an addressable character grid (16 columns by 2
//! rows by default) that behaves like the HD44780-style panel at the gate:
//! text is written at a cursor position and overwrites cells in place,
//! and anything past the right edge is dropped.
//!
//! # Examples
//!
//! ```
//! use gatekeep_emulator::VirtualDisplay;
//! use gatekeep_hardware::DisplayPort;
//!
//! let mut display = VirtualDisplay::new(2, 16);
//! display.write_at(0, 0, "Enter Code to   ").unwrap();
//! display.write_at(11, 1, "7").unwrap();
//!
//! assert_eq!(display.get_line(0).unwrap(), "Enter Code to   ");
//! assert_eq!(display.get_line(1).unwrap(), "           7    ");
//! ```
//!
//! ## Builder Pattern
//!
//! ```
//! use gatekeep_emulator::VirtualDisplay;
//!
//! let display = VirtualDisplay::builder().with_size(4, 20).build();
//! assert_eq!(display.get_all_lines().len(), 4);
//! ```

use gatekeep_core::constants::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use gatekeep_core::{Error, Result};
use gatekeep_hardware::{DisplayPort, DisplayWrite};

/// Maximum number of writes kept for inspection.
const MAX_WRITE_LOG: usize = 512;

/// Virtual character display.
///
/// Every write is also appended to a bounded log so tests can assert on
/// the exact (position, text) pairs the controller issued.
#[derive(Debug, Clone)]
pub struct VirtualDisplay {
    /// Number of rows.
    rows: usize,

    /// Number of columns per row.
    columns: usize,

    /// Cell contents, one `Vec<char>` per row.
    cells: Vec<Vec<char>>,

    /// Recent writes, oldest first.
    writes: Vec<DisplayWrite>,
}

impl VirtualDisplay {
    /// Create a blank display with the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![' '; columns]; rows],
            writes: Vec::new(),
        }
    }

    /// Create a builder for a display with custom dimensions.
    pub fn builder() -> VirtualDisplayBuilder {
        VirtualDisplayBuilder::default()
    }

    /// Write `text` at (`column`, `row`), overwriting cells in place.
    ///
    /// Control characters are removed and text past the last column is
    /// truncated.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if the start position is outside
    /// the grid.
    pub fn write_text(&mut self, column: usize, row: usize, text: &str) -> Result<()> {
        if row >= self.rows || column >= self.columns {
            return Err(Error::InvalidPosition {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let sanitized = sanitize_text(text);
        let visible = truncate_text(&sanitized, self.columns - column);
        for (offset, c) in visible.chars().enumerate() {
            self.cells[row][column + offset] = c;
        }

        self.writes.push(DisplayWrite::new(column, row, sanitized));
        if self.writes.len() > MAX_WRITE_LOG {
            self.writes.remove(0);
        }
        Ok(())
    }

    /// Get the text of one row, padded to the column width.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `row` is out of bounds.
    pub fn get_line(&self, row: usize) -> Result<String> {
        self.cells
            .get(row)
            .map(|cells| cells.iter().collect())
            .ok_or(Error::InvalidPosition {
                column: 0,
                row,
                columns: self.columns,
                rows: self.rows,
            })
    }

    /// Get all rows, top to bottom.
    pub fn get_all_lines(&self) -> Vec<String> {
        self.cells.iter().map(|cells| cells.iter().collect()).collect()
    }

    /// Writes issued so far, oldest first.
    pub fn writes(&self) -> &[DisplayWrite] {
        &self.writes
    }

    /// Drain and return the write log.
    pub fn take_writes(&mut self) -> Vec<DisplayWrite> {
        std::mem::take(&mut self.writes)
    }

    /// Returns `true` if any row contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.get_all_lines().iter().any(|line| line.contains(needle))
    }
}

impl Default for VirtualDisplay {
    fn default() -> Self {
        Self::new(DISPLAY_ROWS, DISPLAY_COLUMNS)
    }
}

impl DisplayPort for VirtualDisplay {
    fn write_at(&mut self, column: usize, row: usize, text: &str) -> gatekeep_hardware::Result<()> {
        Ok(self.write_text(column, row, text)?)
    }
}

/// Builder for constructing `VirtualDisplay` instances with custom dimensions.
#[derive(Debug)]
pub struct VirtualDisplayBuilder {
    rows: usize,
    columns: usize,
}

impl VirtualDisplayBuilder {
    /// Set the display size (rows and columns).
    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Build the virtual display.
    pub fn build(self) -> VirtualDisplay {
        VirtualDisplay::new(self.rows, self.columns)
    }
}

impl Default for VirtualDisplayBuilder {
    fn default() -> Self {
        Self {
            rows: DISPLAY_ROWS,
            columns: DISPLAY_COLUMNS,
        }
    }
}

/// Truncate text to a maximum number of characters.
///
/// # Examples
///
/// ```
/// use gatekeep_emulator::truncate_text;
///
/// assert_eq!(truncate_text("CLOSING IN", 7), "CLOSING");
/// assert_eq!(truncate_text("OPEN", 10), "OPEN");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Remove control characters; spaces are kept since they blank cells.
fn sanitize_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}
