//! Source file representation with line-start indexing for fast line/column lookup.

use crate::resolved_location::ResolvedLocation;
use retrace_common::Position;
use std::path::PathBuf;

/// A source file as seen by a compiler diagnostic.
///
/// Stores the file's content along with precomputed line-start offsets so
/// character offsets can be resolved to line/column coordinates. Offsets and
/// columns count Unicode scalar values, not bytes.
pub struct SourceFile {
    /// The filesystem path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
    /// Character offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
    /// Length of `content` in characters.
    char_len: u32,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_starts = compute_line_starts(&content);
        let char_len = content.chars().count() as u32;
        Self {
            path: path.into(),
            content,
            line_starts,
            char_len,
        }
    }

    /// Converts a character offset into 1-indexed (line, column) coordinates.
    ///
    /// Offsets past the end of the file clamp to the end of the last line.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.char_len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Converts a character offset into a [`Position`] (1-based line, 0-based column).
    pub fn position(&self, offset: u32) -> Position {
        let (line, col) = self.line_col(offset);
        Position::new(line, col - 1)
    }

    /// Resolves a character offset to a displayable location in this file.
    pub fn resolve(&self, offset: u32) -> ResolvedLocation {
        let (line, column) = self.line_col(offset);
        ResolvedLocation {
            file_path: self.path.clone(),
            line,
            column,
        }
    }

    /// Returns the number of lines in the file.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Computes the character offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, c) in content.chars().enumerate() {
        if c == '\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
