//! Contracts of the two external compilers the pipeline drives.

use crate::error::TransformError;
use retrace_config::CompilerOptions;
use retrace_diagnostics::CompilerDiagnostic;
use retrace_sourcemap::{OutputMap, SyntaxNode};
use serde_json::{Map, Value};

/// What the stage-1 compiler returns for one file.
#[derive(Clone, Debug, Default)]
pub struct CompileOutput {
    /// The intermediate code.
    pub output_text: String,
    /// Encoded source map from the intermediate code back to the input.
    pub source_map_text: String,
    /// Every diagnostic reported, of any severity.
    pub diagnostics: Vec<CompilerDiagnostic>,
}

/// Compiles typed source into intermediate code plus a source map.
///
/// Problems with the input are reported as diagnostics, not as `Err`; the
/// pipeline decides which severities are fatal.
pub trait Stage1Compiler {
    /// Compiles one file.
    fn compile(&self, source: &str, file_name: &str, options: &CompilerOptions) -> CompileOutput;
}

/// One file handed to the stage-2 transformer.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformRequest {
    /// The file's text.
    pub src: String,
    /// The file's name, used for extension dispatch and in maps.
    pub filename: String,
    /// Host-supplied transform options, passed through untouched.
    pub options: Value,
}

impl TransformRequest {
    /// Creates a request.
    pub fn new(src: impl Into<String>, filename: impl Into<String>, options: Value) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
            options,
        }
    }
}

/// Legacy hosts call with three positional arguments rather than one packed
/// request; both conventions normalize to the same [`TransformRequest`].
impl From<(String, String, Value)> for TransformRequest {
    fn from((src, filename, options): (String, String, Value)) -> Self {
        Self {
            src,
            filename,
            options,
        }
    }
}

impl From<(&str, &str, Value)> for TransformRequest {
    fn from((src, filename, options): (&str, &str, Value)) -> Self {
        Self::new(src, filename, options)
    }
}

/// What the stage-2 transformer returns.
///
/// Only `ast` and `map` are interpreted by the pipeline; everything else is
/// returned to the host as the transformer produced it.
#[derive(Clone, Debug, Default)]
pub struct TransformOutput {
    /// The final code, for transformers that print code.
    pub code: Option<String>,
    /// The final syntax tree, for transformers that hand back a tree.
    pub ast: Option<SyntaxNode>,
    /// The map from final output back to the transformer's input.
    pub map: Option<OutputMap>,
    /// Any other fields the transformer reports.
    pub metadata: Map<String, Value>,
}

/// Lowers intermediate code into final output.
pub trait Stage2Transformer {
    /// Transforms one file.
    fn transform(&self, request: &TransformRequest) -> Result<TransformOutput, TransformError>;

    /// The transformer's own cache fingerprint, if it has one.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

/// A stage-2 transformer from hosts that pass `(src, filename, options)`.
pub trait PositionalTransformer {
    /// Transforms one file.
    fn transform(
        &self,
        src: &str,
        filename: &str,
        options: &Value,
    ) -> Result<TransformOutput, TransformError>;
}

/// Adapts a [`PositionalTransformer`] to the packed [`Stage2Transformer`] contract.
///
/// Positional transformers expose no fingerprint.
pub struct Positional<T>(pub T);

impl<T: PositionalTransformer> Stage2Transformer for Positional<T> {
    fn transform(&self, request: &TransformRequest) -> Result<TransformOutput, TransformError> {
        self.0
            .transform(&request.src, &request.filename, &request.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    struct Recording {
        calls: RefCell<Vec<(String, String, Value)>>,
    }

    impl PositionalTransformer for Recording {
        fn transform(
            &self,
            src: &str,
            filename: &str,
            options: &Value,
        ) -> Result<TransformOutput, TransformError> {
            self.calls
                .borrow_mut()
                .push((src.to_string(), filename.to_string(), options.clone()));
            Ok(TransformOutput {
                code: Some(src.to_uppercase()),
                ..TransformOutput::default()
            })
        }
    }

    #[test]
    fn positional_receives_unpacked_arguments() {
        let adapter = Positional(Recording {
            calls: RefCell::new(Vec::new()),
        });
        let request = TransformRequest::new("var a;", "a.js", json!({"dev": true}));
        let out = adapter.transform(&request).unwrap();

        assert_eq!(out.code.as_deref(), Some("VAR A;"));
        assert_eq!(
            adapter.0.calls.borrow().as_slice(),
            &[("var a;".to_string(), "a.js".to_string(), json!({"dev": true}))]
        );
        assert!(adapter.fingerprint().is_none());
    }

    #[test]
    fn tuple_convention_normalizes() {
        let packed = TransformRequest::new("x", "x.ts", json!({}));
        let positional: TransformRequest = ("x".to_string(), "x.ts".to_string(), json!({})).into();
        assert_eq!(packed, positional);
        let borrowed: TransformRequest = ("x", "x.ts", json!({})).into();
        assert_eq!(packed, borrowed);
    }
}
