//! Human-readable resolved source locations with line/column coordinates.

use std::fmt;
use std::path::PathBuf;

/// A location resolved to human-readable line/column coordinates.
///
/// Line and column are both 1-indexed for display to users.
/// Produced by [`SourceFile::resolve`](crate::SourceFile::resolve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// The path (or synthetic name) of the source file.
    pub file_path: PathBuf,
    /// The line number (1-indexed).
    pub line: u32,
    /// The column number (1-indexed).
    pub column: u32,
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({},{})",
            self.file_path.display(),
            self.line,
            self.column
        )
    }
}
