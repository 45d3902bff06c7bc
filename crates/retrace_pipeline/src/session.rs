//! Per-process state: resolved configuration, fingerprint and host capabilities.
//!
//! Everything here is computed once, before the first transform, and read by
//! every transform afterwards.

use crate::adapters::{Stage1Compiler, Stage2Transformer};
use crate::fingerprint::fingerprint;
use crate::host::HostCapabilities;
use crate::orchestrator::Pipeline;
use retrace_config::{load_tsconfig, CompilerOptions, ConfigError, TsConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

static SESSION: OnceLock<Session> = OnceLock::new();

/// State shared by every transform in the process.
#[derive(Debug, Clone)]
pub struct Session {
    /// The resolved configuration.
    pub config: TsConfig,
    /// Stage-1 options derived from `config`.
    pub compiler_options: CompilerOptions,
    /// The cache fingerprint reported to the host.
    pub fingerprint: String,
    /// What the host runtime supports.
    pub host: HostCapabilities,
}

impl Session {
    /// Builds a session from an already resolved configuration.
    pub fn new(config: TsConfig, upstream: &dyn Stage2Transformer, host: HostCapabilities) -> Self {
        let compiler_options = config.compiler_options();
        let fingerprint = fingerprint(upstream.fingerprint().as_deref(), &config.document);
        info!(
            config = %config.path.display(),
            host = %host.version,
            mode = ?host.mode,
            "session ready"
        );
        Self {
            config,
            compiler_options,
            fingerprint,
            host,
        }
    }

    /// Discovers the configuration from `cwd` and builds a session.
    pub fn load(
        cwd: &Path,
        override_path: Option<&str>,
        upstream: &dyn Stage2Transformer,
        host: HostCapabilities,
    ) -> Result<Self, ConfigError> {
        let config = load_tsconfig(cwd, override_path)?;
        Ok(Self::new(config, upstream, host))
    }

    /// Returns a pipeline over this session's options and integration mode.
    pub fn pipeline<'a>(
        &'a self,
        compiler: &'a dyn Stage1Compiler,
        transformer: &'a dyn Stage2Transformer,
    ) -> Pipeline<'a> {
        Pipeline::new(compiler, transformer, &self.compiler_options, self.host.mode)
    }
}

/// Installs the process-wide session.
///
/// The first session installed wins; later calls return it unchanged.
pub fn install(session: Session) -> &'static Session {
    SESSION.get_or_init(|| session)
}

/// Returns the process-wide session, if one has been installed.
pub fn current() -> Option<&'static Session> {
    SESSION.get()
}
