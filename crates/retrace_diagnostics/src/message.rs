//! Nested diagnostic message chains.

use serde::{Deserialize, Serialize};

/// A diagnostic message, optionally followed by nested elaborations.
///
/// Compilers often explain an error as a chain ("Type 'A' is not assignable
/// to type 'B'." followed by the property that differs). Each nesting level is
/// indented by two spaces when flattened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageChain {
    /// The message text at this level.
    pub text: String,
    /// Elaborations nested one level deeper.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<MessageChain>,
}

impl MessageChain {
    /// Creates a single-level message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: Vec::new(),
        }
    }

    /// Appends a nested elaboration.
    pub fn with_next(mut self, next: MessageChain) -> Self {
        self.next.push(next);
        self
    }

    /// Flattens the chain into one string, separating levels with `new_line`.
    pub fn flatten(&self, new_line: &str) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out, new_line, 0);
        out
    }

    fn flatten_into(&self, out: &mut String, new_line: &str, indent: usize) {
        if indent > 0 {
            out.push_str(new_line);
            out.push_str(&"  ".repeat(indent));
        }
        out.push_str(&self.text);
        for kid in &self.next {
            kid.flatten_into(out, new_line, indent + 1);
        }
    }
}

impl From<&str> for MessageChain {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for MessageChain {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}
