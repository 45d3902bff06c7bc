//! Rendering of the diagnostic that aborts a file's transform.

use crate::diagnostic::CompilerDiagnostic;

/// Returns the first error-severity diagnostic, if any.
pub fn first_error(diagnostics: &[CompilerDiagnostic]) -> Option<&CompilerDiagnostic> {
    diagnostics.iter().find(|d| d.severity.is_error())
}

/// Formats a diagnostic as a single human-locatable line.
///
/// Produces `<file> (<line>,<col>): <message>` with 1-based line and column
/// when the diagnostic has a file, and the bare flattened message otherwise.
pub fn render_fatal(diag: &CompilerDiagnostic) -> String {
    let message = diag.message.flatten("\n");
    match diag.location() {
        Some(location) => format!("{location}: {message}"),
        None => message,
    }
}
