//! Stage-1 compiler diagnostics and their rendering as fatal errors.
//!
//! The stage-1 compiler reports [`CompilerDiagnostic`]s with a [`Severity`]
//! category, a possibly nested [`MessageChain`], and an optional file and
//! character offset. The first error-severity diagnostic of a compile aborts the
//! file's transform; [`render_fatal`] formats it as `<file> (<line>,<col>): <message>`.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod message;
pub mod renderer;
pub mod severity;

pub use diagnostic::{CompilerDiagnostic, DiagnosticFile};
pub use message::MessageChain;
pub use renderer::{first_error, render_fatal};
pub use severity::Severity;
