//! Multi-part streaming hash for cache fingerprints.

use retrace_common::ContentHash;
use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

/// Builds a fingerprint from an ordered sequence of parts.
///
/// Each part is length-prefixed before hashing, so `["ab", "c"]` and
/// `["a", "bc"]` produce different fingerprints.
pub struct Fingerprinter {
    hasher: Xxh3,
}

impl Fingerprinter {
    /// Creates a fingerprinter with no parts.
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    /// Adds a byte part.
    pub fn bytes(mut self, part: &[u8]) -> Self {
        self.hasher.update(&(part.len() as u64).to_le_bytes());
        self.hasher.update(part);
        self
    }

    /// Adds a string part.
    pub fn str(self, part: &str) -> Self {
        self.bytes(part.as_bytes())
    }

    /// Adds the compact JSON serialization of a document.
    ///
    /// `serde_json` maps are ordered by key, so equal documents serialize
    /// identically regardless of how they were built.
    pub fn json(self, value: &Value) -> Self {
        self.str(&value.to_string())
    }

    /// Finishes hashing.
    pub fn finish(self) -> ContentHash {
        ContentHash::from_digest(self.hasher.digest128())
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}
