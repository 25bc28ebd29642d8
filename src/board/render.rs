//! Text rendering of a board as a bordered table.

use super::{Board, Point};
use std::fmt;

/// Placeholder shown for empty cells.
pub const EMPTY_CELL: char = '-';

impl Board {
    /// Render the board one row per line, boxed like:
    ///
    /// ```text
    /// +---+---+
    /// | c | a |
    /// +---+---+
    /// | - | t |
    /// +---+---+
    /// ```
    pub fn render_table(&self) -> String {
        self.to_string()
    }

    fn write_separator(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("+")?;
        for _ in 0..self.width() {
            f.write_str("---+")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_separator(f)?;
        for y in 0..self.height() {
            f.write_str("|")?;
            for x in 0..self.width() {
                let c = self.at(Point::new(x, y)).unwrap_or(EMPTY_CELL);
                write!(f, " {} |", c)?;
            }
            writeln!(f)?;
            self.write_separator(f)?;
        }
        Ok(())
    }
}
