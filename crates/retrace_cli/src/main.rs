//! Retrace CLI: inspect the resolved configuration and work with source maps
//! outside of a bundler.
//!
//! Provides `retrace config` and `retrace fingerprint` for checking what the
//! transformer will see at startup, and `retrace compose` / `retrace lookup`
//! for composing and querying maps by hand.

#![warn(missing_docs)]

mod inspect;
mod maps;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use retrace_common::Position;
use tracing_subscriber::EnvFilter;

/// Retrace: two-stage source map composition.
#[derive(Parser, Debug)]
#[command(name = "retrace", version, about = "Two-stage source map composition")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the `tsconfig.json` to use, overriding `TSCONFIG_PATH`.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Do not search for `tsconfig.json` above this directory.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration with its `extends` chain merged.
    Config,
    /// Print the transform cache fingerprint.
    Fingerprint {
        /// The stage-2 transformer's own fingerprint.
        #[arg(long)]
        upstream: Option<String>,
    },
    /// Compose a stage-2 map with a stage-1 map.
    Compose(ComposeArgs),
    /// Translate a generated position through a map.
    Lookup(LookupArgs),
}

/// Arguments for the `retrace compose` subcommand.
#[derive(Parser, Debug)]
pub struct ComposeArgs {
    /// The stage-1 map (intermediate back to original).
    #[arg(long)]
    pub intermediate: String,

    /// The stage-2 map (final back to intermediate), raw list or structured.
    #[arg(long = "final")]
    pub final_map: String,

    /// The original source file.
    #[arg(long)]
    pub source: String,

    /// Where to write the composed map (default: stdout).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the `retrace lookup` subcommand.
#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// The map to query, raw list or structured.
    pub map: String,

    /// The generated position as `<line>:<column>` (1-based line, 0-based column).
    #[arg(value_parser = parse_position)]
    pub position: Position,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to the configuration file.
    pub config: Option<String>,
    /// Optional ceiling for configuration discovery.
    pub root: Option<PathBuf>,
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (line, column) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <line>:<column>, got `{raw}`"))?;
    let line = line
        .parse::<u32>()
        .map_err(|e| format!("invalid line `{line}`: {e}"))?;
    let column = column
        .parse::<u32>()
        .map_err(|e| format!("invalid column `{column}`: {e}"))?;
    if line == 0 {
        return Err("lines are 1-based".to_string());
    }
    Ok(Position::new(line, column))
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
        root: cli.root,
    };

    let result = match cli.command {
        Command::Config => inspect::config(&global),
        Command::Fingerprint { ref upstream } => inspect::fingerprint(upstream.as_deref(), &global),
        Command::Compose(ref args) => maps::compose(args, &global),
        Command::Lookup(ref args) => maps::lookup(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_command() {
        let cli = Cli::parse_from(["retrace", "config"]);
        assert!(matches!(cli.command, Command::Config));
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["retrace", "--quiet", "--config", "app/tsconfig.json", "config"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("app/tsconfig.json"));
    }

    #[test]
    fn parse_root_after_subcommand() {
        let cli = Cli::parse_from(["retrace", "config", "--root", "/work/app"]);
        assert_eq!(cli.root, Some(PathBuf::from("/work/app")));
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["retrace", "fingerprint", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_fingerprint_upstream() {
        let cli = Cli::parse_from(["retrace", "fingerprint", "--upstream", "babel-7"]);
        match cli.command {
            Command::Fingerprint { upstream } => assert_eq!(upstream.as_deref(), Some("babel-7")),
            _ => panic!("expected Fingerprint command"),
        }
    }

    #[test]
    fn parse_compose() {
        let cli = Cli::parse_from([
            "retrace",
            "compose",
            "--intermediate",
            "a.js.map",
            "--final",
            "bundle.map",
            "--source",
            "src/a.ts",
            "-o",
            "out.map",
        ]);
        match cli.command {
            Command::Compose(ref args) => {
                assert_eq!(args.intermediate, "a.js.map");
                assert_eq!(args.final_map, "bundle.map");
                assert_eq!(args.source, "src/a.ts");
                assert_eq!(args.output.as_deref(), Some("out.map"));
            }
            _ => panic!("expected Compose command"),
        }
    }

    #[test]
    fn parse_compose_requires_inputs() {
        assert!(Cli::try_parse_from(["retrace", "compose", "--final", "b.map"]).is_err());
    }

    #[test]
    fn parse_lookup() {
        let cli = Cli::parse_from(["retrace", "lookup", "a.map", "12:4"]);
        match cli.command {
            Command::Lookup(ref args) => {
                assert_eq!(args.map, "a.map");
                assert_eq!(args.position, Position::new(12, 4));
            }
            _ => panic!("expected Lookup command"),
        }
    }

    #[test]
    fn position_parsing_errors() {
        assert!(parse_position("12").is_err());
        assert!(parse_position("x:1").is_err());
        assert!(parse_position("1:-3").is_err());
        assert!(parse_position("0:0").is_err());
        assert_eq!(parse_position("1:0"), Ok(Position::new(1, 0)));
    }
}
