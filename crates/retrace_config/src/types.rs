//! The resolved configuration and the stage-1 compiler options derived from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A fully resolved configuration: the `extends` chain merged, no `extends` key.
#[derive(Debug, Clone, PartialEq)]
pub struct TsConfig {
    /// The file the configuration was discovered at.
    pub path: PathBuf,
    /// The merged document.
    pub document: Value,
}

impl TsConfig {
    /// Wraps a resolved document.
    pub fn new(path: impl Into<PathBuf>, document: Value) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    /// Returns the stage-1 compiler options with source maps forced on.
    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions::from_config(&self.document)
    }
}

/// Options handed verbatim to the stage-1 compiler.
///
/// Keys are kept exactly as written in `compilerOptions`, except that
/// `sourceMap` and `inlineSources` are always `true`: the composed map needs
/// a stage-1 map with the original text embedded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilerOptions(Map<String, Value>);

impl CompilerOptions {
    /// Extracts `compilerOptions` from a resolved document and forces source maps.
    pub fn from_config(document: &Value) -> Self {
        let options = document
            .get("compilerOptions")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self(options).forced()
    }

    fn forced(mut self) -> Self {
        self.0.insert("sourceMap".to_string(), Value::Bool(true));
        self.0.insert("inlineSources".to_string(), Value::Bool(true));
        self
    }

    /// Returns the raw value of an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the option is present and set to `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Returns all options as a JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
