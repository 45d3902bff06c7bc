//! Line/column positions shared by source maps and syntax-tree locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in one coordinate space (original, intermediate or final code).
///
/// Lines are 1-based and columns are 0-based, the convention used by source
/// map consumers and by syntax-tree `loc` annotations. Positions are only
/// meaningfully compared within the same coordinate space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    /// The line number (1-based).
    pub line: u32,
    /// The column number (0-based).
    pub column: u32,
}

impl Position {
    /// Creates a position from a 1-based line and a 0-based column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Creates a position from a 0-based line, as stored in encoded source maps.
    pub fn from_zero_based(line: u32, column: u32) -> Self {
        Self {
            line: line + 1,
            column,
        }
    }

    /// Returns the `(line, column)` pair with a 0-based line.
    ///
    /// A line of `0` is not a valid position and saturates to line `0`.
    pub fn to_zero_based(self) -> (u32, u32) {
        (self.line.saturating_sub(1), self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
