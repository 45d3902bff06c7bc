//! Shared foundational types used across the retrace source-map toolchain.
//!
//! This crate provides source positions in the 1-based-line / 0-based-column
//! convention used by source maps and syntax trees, and content hashing for
//! cache fingerprints.

#![warn(missing_docs)]

pub mod hash;
pub mod position;

pub use hash::ContentHash;
pub use position::Position;
