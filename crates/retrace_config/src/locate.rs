//! Resolution of configuration references to files on disk.
//!
//! A reference is either a path (absolute, or starting with `.`) or a bare
//! module name looked up in `node_modules` directories, the way a Node
//! `require.resolve` finds a JSON file.

use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The part of a package manifest that locates its entry file.
#[derive(Deserialize)]
struct PackageManifest {
    main: Option<String>,
}

/// Resolves a path or module reference to an existing file.
///
/// Paths are resolved against `base_dir`. Bare module names are searched in
/// `node_modules/` under `base_dir` and each of its ancestors. For each
/// candidate the exact path and the path with `.json` appended are tried;
/// a directory then resolves through the `main` of its `package.json`,
/// falling back to `index.json`.
pub fn resolve_location(location: &str, base_dir: &Path) -> Option<PathBuf> {
    let path = Path::new(location);
    if path.is_absolute() || location.starts_with('.') {
        return resolve_file(&base_dir.join(path));
    }

    let mut dir = Some(base_dir);
    while let Some(current) = dir {
        if let Some(found) = resolve_file(&current.join("node_modules").join(path)) {
            return Some(found);
        }
        dir = current.parent();
    }
    None
}

/// Tries `candidate` as a file, then as a package directory.
fn resolve_file(candidate: &Path) -> Option<PathBuf> {
    as_file(candidate).or_else(|| as_directory(candidate))
}

/// The exact file, then `.json` appended.
fn as_file(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }

    let mut with_ext = OsString::from(candidate.as_os_str());
    with_ext.push(".json");
    let with_ext = PathBuf::from(with_ext);
    with_ext.is_file().then_some(with_ext)
}

/// The `main` entry of the directory's `package.json`, then `index.json`.
fn as_directory(dir: &Path) -> Option<PathBuf> {
    if let Some(main) = package_main(dir) {
        let entry = dir.join(main);
        if let Some(found) = as_file(&entry) {
            return Some(found);
        }
        let index = entry.join("index.json");
        if index.is_file() {
            return Some(index);
        }
        debug!(package = %dir.display(), "package main does not resolve");
    }

    let index = dir.join("index.json");
    index.is_file().then_some(index)
}

fn package_main(dir: &Path) -> Option<String> {
    let manifest_path = dir.join("package.json");
    let text = fs::read_to_string(&manifest_path).ok()?;
    match serde_json::from_str::<PackageManifest>(&text) {
        Ok(manifest) => manifest.main.filter(|main| !main.is_empty()),
        Err(e) => {
            debug!(manifest = %manifest_path.display(), error = %e, "ignoring unreadable package.json");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.json"), "{}").unwrap();

        let found = resolve_location("./base.json", dir.path()).unwrap();
        assert!(found.ends_with("base.json"));
    }

    #[test]
    fn json_suffix_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.json"), "{}").unwrap();

        assert!(resolve_location("./base", dir.path()).is_some());
    }

    #[test]
    fn absolute_path_ignores_base() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("abs.json");
        fs::write(&file, "{}").unwrap();

        let found = resolve_location(file.to_str().unwrap(), Path::new("/nonexistent")).unwrap();
        assert_eq!(found, file);
    }

    #[test]
    fn module_found_in_ancestor_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("@scope").join("tsconfig");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("index.json"), "{}").unwrap();
        let nested = dir.path().join("packages").join("app");
        fs::create_dir_all(&nested).unwrap();

        let found = resolve_location("@scope/tsconfig", &nested).unwrap();
        assert_eq!(found, pkg.join("index.json"));
    }

    #[test]
    fn module_file_with_json_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("shared");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("strict.json"), "{}").unwrap();

        let found = resolve_location("shared/strict", dir.path()).unwrap();
        assert_eq!(found, pkg.join("strict.json"));
    }

    #[test]
    fn module_resolves_through_package_main() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir
            .path()
            .join("node_modules")
            .join("@react-native")
            .join("typescript-config");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"name": "@react-native/typescript-config", "main": "tsconfig.json"}"#).unwrap();
        fs::write(pkg.join("tsconfig.json"), "{}").unwrap();

        let found = resolve_location("@react-native/typescript-config", dir.path()).unwrap();
        assert_eq!(found, pkg.join("tsconfig.json"));
    }

    #[test]
    fn package_main_wins_over_index() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("preset");
        fs::create_dir_all(pkg.join("config")).unwrap();
        fs::write(pkg.join("package.json"), r#"{"main": "./config/base"}"#).unwrap();
        fs::write(pkg.join("config").join("base.json"), "{}").unwrap();
        fs::write(pkg.join("index.json"), "{}").unwrap();

        let found = resolve_location("preset", dir.path()).unwrap();
        assert_eq!(found, pkg.join("./config/base.json"));
    }

    #[test]
    fn broken_package_main_falls_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("preset");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"main": "missing.json"}"#).unwrap();
        fs::write(pkg.join("index.json"), "{}").unwrap();

        assert_eq!(resolve_location("preset", dir.path()).unwrap(), pkg.join("index.json"));
    }

    #[test]
    fn unresolvable_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_location("no-such-package", dir.path()).is_none());
        assert!(resolve_location("./missing", dir.path()).is_none());
    }
}
