//! Diagnostics reported by the stage-1 compiler.

use crate::message::MessageChain;
use crate::severity::Severity;
use retrace_source::{ResolvedLocation, SourceFile};
use serde::{Deserialize, Serialize};

/// The file a diagnostic points into, with the text needed to resolve offsets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticFile {
    /// The file name as the compiler knows it.
    pub name: String,
    /// The file's full text.
    pub text: String,
}

/// A diagnostic produced by the stage-1 compiler.
///
/// `file` and `start` are both optional: global diagnostics (e.g. about
/// compiler options) carry neither.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompilerDiagnostic {
    /// The severity category.
    pub severity: Severity,
    /// The (possibly nested) message.
    pub message: MessageChain,
    /// The file the diagnostic was reported against.
    #[serde(default)]
    pub file: Option<DiagnosticFile>,
    /// Character offset of the diagnostic within `file`.
    #[serde(default)]
    pub start: Option<u32>,
}

impl CompilerDiagnostic {
    /// Creates an error diagnostic with no location.
    pub fn error(message: impl Into<MessageChain>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            file: None,
            start: None,
        }
    }

    /// Creates a warning diagnostic with no location.
    pub fn warning(message: impl Into<MessageChain>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            file: None,
            start: None,
        }
    }

    /// Attaches the file and character offset the diagnostic points at.
    pub fn at(mut self, name: impl Into<String>, text: impl Into<String>, start: u32) -> Self {
        self.file = Some(DiagnosticFile {
            name: name.into(),
            text: text.into(),
        });
        self.start = Some(start);
        self
    }

    /// Resolves the diagnostic's location to 1-based line and column.
    ///
    /// Returns `None` when the diagnostic carries no file. A file without a
    /// start offset resolves to its first character.
    pub fn location(&self) -> Option<ResolvedLocation> {
        let file = self.file.as_ref()?;
        let source = SourceFile::new(file.name.as_str(), file.text.as_str());
        Some(source.resolve(self.start.unwrap_or(0)))
    }
}
