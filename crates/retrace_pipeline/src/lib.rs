//! The two-stage transform pipeline and its process-wide session.
//!
//! A [`Pipeline`] runs typed source through a [`Stage1Compiler`], checks its
//! diagnostics, hands the intermediate code to a [`Stage2Transformer`], and
//! composes the two stages' location data so the result points at the
//! author's source. Files that are not typed source skip stage 1.
//!
//! The configuration, fingerprint and host capabilities are resolved once
//! per process into a [`Session`].

#![warn(missing_docs)]

pub mod adapters;
pub mod error;
pub mod fingerprint;
pub mod host;
pub mod orchestrator;
pub mod session;

pub use adapters::{
    CompileOutput, Positional, PositionalTransformer, Stage1Compiler, Stage2Transformer,
    TransformOutput, TransformRequest,
};
pub use error::{PipelineError, TransformError};
pub use fingerprint::fingerprint;
pub use host::{CallConvention, HostCapabilities, IntegrationMode};
pub use orchestrator::{is_typed_source, Pipeline};
pub use session::Session;
