//! Error types for configuration discovery and loading.

use std::path::PathBuf;

/// Errors that can occur when locating or loading a `tsconfig.json`.
///
/// All of these are fatal: the configuration is loaded once per process and
/// shared by every transform.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither a file nor a `node_modules` package matched the reference.
    #[error("Could not load config from {location}")]
    NotFound {
        /// The path or module name that failed to resolve.
        location: String,
    },

    /// The resolved file could not be read or parsed as relaxed JSON.
    #[error("Error loading config {location}:\n  Error reading \"{}\":\n  {message}", .path.display())]
    Parse {
        /// The reference as written by the caller or the `extends` field.
        location: String,
        /// The file the reference resolved to.
        path: PathBuf,
        /// Description of the read or parse failure.
        message: String,
    },

    /// An `extends` chain led back to a file already being loaded.
    #[error("circular \"extends\" chain: {}", format_chain(.chain))]
    ExtendsCycle {
        /// The files in the chain, ending with the repeated one.
        chain: Vec<PathBuf>,
    },

    /// No configuration file could be discovered.
    #[error(
        "Unable to find a \"{file_name}\" file in {} or any parent directory. \
         It should be placed at the root of your project. Otherwise, you can \
         specify another location using the {env_var} environment variable.",
        .searched_from.display()
    )]
    Missing {
        /// The configuration file name that was searched for.
        file_name: &'static str,
        /// The environment variable that overrides discovery.
        env_var: &'static str,
        /// The directory the upward search started from.
        searched_from: PathBuf,
    },
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = ConfigError::NotFound {
            location: "@company/tsconfig".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Could not load config from @company/tsconfig"
        );
    }

    #[test]
    fn display_parse_error() {
        let err = ConfigError::Parse {
            location: "./base".to_string(),
            path: PathBuf::from("/app/base.json"),
            message: "unexpected end of input".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Error loading config ./base:"));
        assert!(msg.contains("Error reading \"/app/base.json\""));
        assert!(msg.ends_with("unexpected end of input"));
    }

    #[test]
    fn display_cycle() {
        let err = ConfigError::ExtendsCycle {
            chain: vec![PathBuf::from("a.json"), PathBuf::from("b.json"), PathBuf::from("a.json")],
        };
        assert_eq!(
            err.to_string(),
            "circular \"extends\" chain: a.json -> b.json -> a.json"
        );
    }

    #[test]
    fn display_missing_names_file_and_variable() {
        let err = ConfigError::Missing {
            file_name: "tsconfig.json",
            env_var: "TSCONFIG_PATH",
            searched_from: PathBuf::from("/work/app"),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"tsconfig.json\""));
        assert!(msg.contains("TSCONFIG_PATH"));
        assert!(msg.contains("/work/app"));
    }
}
