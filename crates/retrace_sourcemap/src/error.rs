//! Error types for reading and writing source maps.

/// Errors raised while decoding or encoding a map.
///
/// A position with no mapping is not an error; lookups return `None` for it.
#[derive(Debug, thiserror::Error)]
pub enum SourceMapError {
    /// The `sourcemap` crate rejected a structured map.
    #[error("source map error: {0}")]
    Sourcemap(#[from] sourcemap::Error),

    /// A map was not valid JSON, or a raw mapping tuple was malformed.
    #[error("invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON value was neither a mapping list nor a map object.
    #[error("expected a mapping list or a source map object, found {found}")]
    UnsupportedShape {
        /// The JSON type that was found.
        found: &'static str,
    },
}
