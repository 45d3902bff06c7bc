//! Content hashing for cache fingerprints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit content hash computed using XXH3.
///
/// Used to build cache fingerprints: two transforms whose inputs hash to the
/// same `ContentHash` are assumed to produce identical output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_digest(xxhash_rust::xxh3::xxh3_128(data))
    }

    /// Wraps a finished XXH3-128 digest, e.g. from a streaming hasher.
    pub fn from_digest(digest: u128) -> Self {
        Self(digest.to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::from_bytes(b"compilerOptions");
        let b = ContentHash::from_bytes(b"compilerOptions");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::from_bytes(b"{\"strict\":true}");
        let b = ContentHash::from_bytes(b"{\"strict\":false}");
        assert_ne!(a, b);
    }

    #[test]
    fn digest_matches_one_shot() {
        let digest = xxhash_rust::xxh3::xxh3_128(b"tsconfig");
        assert_eq!(
            ContentHash::from_digest(digest),
            ContentHash::from_bytes(b"tsconfig")
        );
    }

    #[test]
    fn display_format() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h}");
        assert_eq!(s.len(), 32, "Display should be 32 hex chars");
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_abbreviated() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h:?}");
        assert!(s.starts_with("ContentHash("));
        assert!(s.ends_with(")"));
    }
}
