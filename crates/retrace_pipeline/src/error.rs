//! Error types for a single file's transform.

use retrace_sourcemap::SourceMapError;

/// A failure reported by a stage-2 transformer.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransformError {
    /// The transformer's message.
    pub message: String,
}

impl TransformError {
    /// Creates a transform error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that abort a transform.
///
/// Each aborts only the current file. Configuration errors surface earlier,
/// from [`Session::load`](crate::Session::load), and abort the process.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Stage 1 reported an error-severity diagnostic.
    ///
    /// The message reads `<file> (<line>,<col>): <message>` when the
    /// diagnostic has a location.
    #[error("{message}")]
    Compile {
        /// The rendered first error.
        message: String,
    },

    /// Stage 2 failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Stage 1's map could not be decoded.
    #[error("invalid stage-1 source map: {0}")]
    SourceMap(#[from] SourceMapError),
}
