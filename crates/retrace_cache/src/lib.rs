//! Cache-invalidation fingerprints.
//!
//! The host bundler caches transform output and reuses it while the
//! fingerprint is unchanged. [`Fingerprinter`] folds every input that can
//! affect output into one streaming XXH3-128 hash.

#![warn(missing_docs)]

pub mod fingerprint;

pub use fingerprint::Fingerprinter;
