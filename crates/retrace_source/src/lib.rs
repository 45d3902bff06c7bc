//! Source text indexing and human-readable locations for diagnostics.
//!
//! This crate provides [`SourceFile`] for converting character offsets reported by
//! the stage-1 compiler into line/column coordinates, and [`ResolvedLocation`]
//! for rendering those coordinates the way fatal compile errors display them.

#![warn(missing_docs)]

pub mod resolved_location;
pub mod source_file;

pub use resolved_location::ResolvedLocation;
pub use source_file::SourceFile;
