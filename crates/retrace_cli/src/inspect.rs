//! `retrace config` and `retrace fingerprint`: what a transformer process
//! resolves at startup.

use std::path::Path;

use retrace_config::{load_tsconfig_within, TsConfig, CONFIG_PATH_ENV};

use crate::GlobalArgs;

/// Loads the configuration the way a transformer process started in `cwd` would.
///
/// `--config` takes precedence over `TSCONFIG_PATH`; `--root` bounds the
/// upward search.
pub fn load(cwd: &Path, global: &GlobalArgs) -> Result<TsConfig, Box<dyn std::error::Error>> {
    let override_path = global
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());
    Ok(load_tsconfig_within(cwd, override_path.as_deref(), global.root.as_deref())?)
}

/// Runs `retrace config`.
pub fn config(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load(&std::env::current_dir()?, global)?;
    if !global.quiet {
        eprintln!("   Resolved {}", config.path.display());
    }
    println!("{}", serde_json::to_string_pretty(&config.document)?);
    Ok(0)
}

/// Runs `retrace fingerprint`.
pub fn fingerprint(upstream: Option<&str>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load(&std::env::current_dir()?, global)?;
    println!("{}", retrace_pipeline::fingerprint(upstream, &config.document));
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            config,
            root: None,
        }
    }

    #[test]
    fn explicit_config_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tsconfig.json"), r#"{"compilerOptions": {"jsx": "react"}}"#).unwrap();
        fs::write(
            tmp.path().join("tsconfig.app.json"),
            r#"{"extends": "./tsconfig", "compilerOptions": {"strict": true}}"#,
        )
        .unwrap();

        let config = load(tmp.path(), &global(Some("tsconfig.app.json".to_string()))).unwrap();
        assert_eq!(config.path, tmp.path().join("tsconfig.app.json"));
        assert_eq!(
            config.document,
            json!({"compilerOptions": {"jsx": "react", "strict": true}})
        );
    }

    #[test]
    fn discovers_from_nested_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tsconfig.json"), "{}").unwrap();
        let nested = tmp.path().join("src");
        fs::create_dir(&nested).unwrap();

        let config = load(&nested, &global(None)).unwrap();
        assert_eq!(config.path, tmp.path().join("tsconfig.json"));
    }

    #[test]
    fn root_bounds_discovery() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tsconfig.json"), "{}").unwrap();
        let app = tmp.path().join("app");
        fs::create_dir(&app).unwrap();

        let bounded = GlobalArgs {
            root: Some(app.clone()),
            ..global(None)
        };
        let err = load(&app, &bounded).unwrap_err();
        assert!(err.to_string().contains("TSCONFIG_PATH"));
    }
}
