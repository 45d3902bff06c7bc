//! The transform cache fingerprint.

use retrace_cache::Fingerprinter;
use serde_json::Value;

/// Source text of the orchestration logic.
const ORCHESTRATOR_SOURCE: &str = include_str!("orchestrator.rs");

/// Computes the cache fingerprint the host keys transform output on.
///
/// Folds in, in order: the stage-2 transformer's own fingerprint (empty when
/// it has none), the compiled-in composition and orchestration logic with
/// this crate's version, and the resolved configuration.
pub fn fingerprint(upstream: Option<&str>, config: &Value) -> String {
    let mut hasher = Fingerprinter::new().str(upstream.unwrap_or(""));
    for source in retrace_sourcemap::COMPOSITION_SOURCES {
        hasher = hasher.str(source);
    }
    hasher
        .str(ORCHESTRATOR_SOURCE)
        .str(env!("CARGO_PKG_VERSION"))
        .json(config)
        .finish()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stable_across_calls() {
        let config = json!({"compilerOptions": {"jsx": "react"}});
        assert_eq!(
            fingerprint(Some("upstream-1"), &config),
            fingerprint(Some("upstream-1"), &config)
        );
    }

    #[test]
    fn upstream_changes_fingerprint() {
        let config = json!({});
        assert_ne!(
            fingerprint(Some("upstream-1"), &config),
            fingerprint(Some("upstream-2"), &config)
        );
    }

    #[test]
    fn missing_upstream_equals_empty() {
        let config = json!({});
        assert_eq!(fingerprint(None, &config), fingerprint(Some(""), &config));
    }

    #[test]
    fn config_changes_fingerprint() {
        assert_ne!(
            fingerprint(None, &json!({"compilerOptions": {"strict": true}})),
            fingerprint(None, &json!({"compilerOptions": {"strict": false}}))
        );
    }

    #[test]
    fn hex_rendering() {
        let fp = fingerprint(None, &json!({}));
        assert_eq!(fp.len(), 32);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
