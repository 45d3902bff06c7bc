//! Reference stage adapters for exercising the retrace pipeline end to end.
//!
//! [`TypeStripper`] plays the stage-1 compiler: it erases type syntax from
//! a small typed-source subset and reports a token-level map. [`Lowering`]
//! plays the stage-2 transformer: it lowers bindings under a strict-mode
//! prologue and reports a map of either shape plus a located syntax tree.
//! Both move code around enough that composed locations are checkable.

#![warn(missing_docs)]

mod lexer;
pub mod lower;
pub mod strip;

pub use lower::{Lowering, MapShape};
pub use strip::TypeStripper;

use retrace_config::CompilerOptions;
use retrace_pipeline::{IntegrationMode, Pipeline, PipelineError, TransformOutput};
use serde_json::json;

/// Runs one file through both reference stages with default options.
pub fn run(
    src: &str,
    filename: &str,
    shape: MapShape,
    mode: IntegrationMode,
) -> Result<TransformOutput, PipelineError> {
    let options = CompilerOptions::from_config(&json!({}));
    let compiler = TypeStripper;
    let transformer = Lowering::new(shape);
    Pipeline::new(&compiler, &transformer, &options, mode).transform((src, filename, json!({})))
}
