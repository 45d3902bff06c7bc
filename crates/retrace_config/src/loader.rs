//! Relaxed-JSON loading with recursive `extends` resolution.

use crate::error::ConfigError;
use crate::locate::resolve_location;
use crate::merge::deep_merge;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parses a relaxed-JSON document (comments and trailing commas allowed).
pub fn parse_document(text: &str) -> Result<Value, String> {
    json5::from_str::<Value>(text).map_err(|e| e.to_string())
}

/// Loads the configuration a path or module reference points to.
///
/// Module references and paths starting with `.` are resolved against
/// `base_dir`. The returned document has its whole `extends` chain merged in
/// and no `extends` key.
pub fn load_config(location: &str, base_dir: &Path) -> Result<Value, ConfigError> {
    let mut visiting = Vec::new();
    load_reference(location, base_dir, &mut visiting)
}

/// Loads the configuration stored in a known file, following `extends`.
pub fn load_config_file(path: &Path) -> Result<Value, ConfigError> {
    let mut visiting = Vec::new();
    load_path(&path.display().to_string(), path, &mut visiting)
}

fn load_reference(
    location: &str,
    base_dir: &Path,
    visiting: &mut Vec<PathBuf>,
) -> Result<Value, ConfigError> {
    let path = resolve_location(location, base_dir).ok_or_else(|| ConfigError::NotFound {
        location: location.to_string(),
    })?;
    load_path(location, &path, visiting)
}

fn load_path(
    location: &str,
    path: &Path,
    visiting: &mut Vec<PathBuf>,
) -> Result<Value, ConfigError> {
    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if visiting.contains(&key) {
        let mut chain = visiting.clone();
        chain.push(key);
        return Err(ConfigError::ExtendsCycle { chain });
    }

    let mut document = read_document(path).map_err(|message| ConfigError::Parse {
        location: location.to_string(),
        path: path.to_path_buf(),
        message,
    })?;

    let Some(extends) = document
        .get("extends")
        .and_then(Value::as_str)
        .map(str::to_owned)
    else {
        return Ok(document);
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let suffix = if extends.ends_with(".json") { "" } else { ".json" };
    let relative = dir.join(format!("{extends}{suffix}"));

    visiting.push(key);
    let parent = if relative.is_file() {
        debug!(child = %path.display(), parent = %relative.display(), "extends file");
        load_path(&relative.display().to_string(), &relative, visiting)?
    } else {
        debug!(child = %path.display(), module = %extends, "extends module");
        load_reference(&extends, dir, visiting)?
    };
    visiting.pop();

    document = deep_merge(parent, document);
    if let Value::Object(map) = &mut document {
        map.remove("extends");
    }
    Ok(document)
}

fn read_document(path: &Path) -> Result<Value, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_document(&text)
}
