//! Source-map composition across a two-stage transform.
//!
//! Stage 1 compiles typed source into intermediate code with a map back to
//! the original; stage 2 lowers intermediate code into final output with a map
//! back to the intermediate code. This crate rewrites stage 2's "original"
//! side through stage 1's map so that final positions point straight at the
//! author's source:
//!
//! - [`Translator`] answers "where in the original did this intermediate
//!   position come from".
//! - [`compose`] rebuilds a raw mapping list or a structured map.
//! - [`patch_locations`] rewrites `loc` annotations of a syntax tree instead.

#![warn(missing_docs)]

pub mod ast;
pub mod compose;
pub mod error;
pub mod lookup;
pub mod raw;

pub use ast::{patch_locations, SourceLocation, SyntaxNode};
pub use compose::{compose, compose_raw, compose_structured, OriginalSource, OutputMap};
pub use error::SourceMapError;
pub use lookup::Translator;
pub use raw::RawMapping;

/// Source text of the composition logic, folded into cache fingerprints so a
/// change to how maps are composed invalidates cached output.
pub const COMPOSITION_SOURCES: [&str; 4] = [
    include_str!("lookup.rs"),
    include_str!("compose.rs"),
    include_str!("raw.rs"),
    include_str!("ast.rs"),
];
