//! Sequencing of stage 1, stage 2 and location composition for one file.

use crate::adapters::{Stage1Compiler, Stage2Transformer, TransformOutput, TransformRequest};
use crate::error::PipelineError;
use crate::host::IntegrationMode;
use retrace_config::CompilerOptions;
use retrace_diagnostics::{first_error, render_fatal};
use retrace_sourcemap::{compose, patch_locations, OriginalSource, Translator};
use tracing::debug;

/// Returns `true` for file names that go through stage 1.
pub fn is_typed_source(filename: &str) -> bool {
    filename.ends_with(".ts") || filename.ends_with(".tsx")
}

/// Transforms files through both stages.
pub struct Pipeline<'a> {
    compiler: &'a dyn Stage1Compiler,
    transformer: &'a dyn Stage2Transformer,
    options: &'a CompilerOptions,
    mode: IntegrationMode,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given stages.
    pub fn new(
        compiler: &'a dyn Stage1Compiler,
        transformer: &'a dyn Stage2Transformer,
        options: &'a CompilerOptions,
        mode: IntegrationMode,
    ) -> Self {
        Self {
            compiler,
            transformer,
            options,
            mode,
        }
    }

    /// Transforms one file.
    ///
    /// Files that are not typed source go to stage 2 unchanged. Typed source
    /// is compiled by stage 1; the first error-severity diagnostic aborts the
    /// file. The intermediate code is then transformed by stage 2, and the
    /// result's locations are moved to original coordinates: in
    /// [`IntegrationMode::AstLocations`] the tree's `loc` annotations are
    /// rewritten, otherwise `map` is replaced by the composed map.
    pub fn transform(
        &self,
        request: impl Into<TransformRequest>,
    ) -> Result<TransformOutput, PipelineError> {
        let request = request.into();
        if !is_typed_source(&request.filename) {
            return Ok(self.transformer.transform(&request)?);
        }

        let compiled = self
            .compiler
            .compile(&request.src, &request.filename, self.options);
        if let Some(error) = first_error(&compiled.diagnostics) {
            return Err(PipelineError::Compile {
                message: render_fatal(error),
            });
        }
        let stage1 = Translator::parse(&compiled.source_map_text)?;

        let intermediate = TransformRequest {
            src: compiled.output_text,
            filename: request.filename.clone(),
            options: request.options.clone(),
        };
        let mut output = self.transformer.transform(&intermediate)?;

        match self.mode {
            IntegrationMode::AstLocations => {
                if let Some(ast) = output.ast.take() {
                    output.ast = Some(patch_locations(&stage1, ast));
                }
            }
            IntegrationMode::StandaloneMap => {
                let original = OriginalSource {
                    file_name: &request.filename,
                    text: &request.src,
                };
                match output.map.take() {
                    Some(map) => output.map = Some(compose(&stage1, &map, original)),
                    None => debug!(file = %request.filename, "stage 2 returned no map"),
                }
            }
        }
        Ok(output)
    }
}
