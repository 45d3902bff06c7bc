//! Locating the project's `tsconfig.json`.

use crate::error::ConfigError;
use crate::loader::load_config_file;
use crate::types::TsConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The configuration file searched for in the project root.
pub const CONFIG_FILE_NAME: &str = "tsconfig.json";

/// Environment variable naming an explicit configuration path.
pub const CONFIG_PATH_ENV: &str = "TSCONFIG_PATH";

/// Finds the configuration file for a process started in `cwd`.
///
/// `override_path` is the value of [`CONFIG_PATH_ENV`], resolved against
/// `cwd`. When it names an existing file that file wins; otherwise a warning
/// is logged and discovery walks up from `cwd` looking for
/// [`CONFIG_FILE_NAME`].
pub fn discover_config_path(cwd: &Path, override_path: Option<&str>) -> Result<PathBuf, ConfigError> {
    discover_config_path_within(cwd, override_path, None)
}

/// Like [`discover_config_path`], but the upward search checks `ceiling`
/// last and never looks above it. A `cwd` outside `ceiling` is searched on
/// its own.
pub fn discover_config_path_within(
    cwd: &Path,
    override_path: Option<&str>,
    ceiling: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(raw) = override_path {
        let resolved = cwd.join(raw);
        if resolved.is_file() {
            return Ok(resolved);
        }
        warn!(
            "{CONFIG_FILE_NAME} specified by {CONFIG_PATH_ENV} was not found \
             ({CONFIG_PATH_ENV} = {raw}, resolved = {}); looking in app root directory",
            resolved.display()
        );
    }

    let mut current = cwd.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found configuration");
            return Ok(candidate);
        }
        let at_ceiling = ceiling.is_some_and(|c| current == c || !current.starts_with(c));
        if at_ceiling || !current.pop() {
            return Err(ConfigError::Missing {
                file_name: CONFIG_FILE_NAME,
                env_var: CONFIG_PATH_ENV,
                searched_from: cwd.to_path_buf(),
            });
        }
    }
}

/// Discovers and fully loads the project configuration.
pub fn load_tsconfig(cwd: &Path, override_path: Option<&str>) -> Result<TsConfig, ConfigError> {
    load_tsconfig_within(cwd, override_path, None)
}

/// Like [`load_tsconfig`], with discovery bounded by `ceiling`.
pub fn load_tsconfig_within(
    cwd: &Path,
    override_path: Option<&str>,
    ceiling: Option<&Path>,
) -> Result<TsConfig, ConfigError> {
    let path = discover_config_path_within(cwd, override_path, ceiling)?;
    let document = load_config_file(&path)?;
    Ok(TsConfig::new(path, document))
}
