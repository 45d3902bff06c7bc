//! Discovery, parsing and inheritance resolution of `tsconfig.json` files.
//!
//! This crate locates the project configuration (honouring `TSCONFIG_PATH`),
//! parses it as relaxed JSON, follows its `extends` chain through files and
//! `node_modules` packages, and exposes the stage-1 [`CompilerOptions`] with
//! source-map generation forced on.

#![warn(missing_docs)]

pub mod discover;
pub mod error;
pub mod loader;
pub mod locate;
pub mod merge;
pub mod types;

pub use discover::{
    discover_config_path, discover_config_path_within, load_tsconfig, load_tsconfig_within,
    CONFIG_FILE_NAME, CONFIG_PATH_ENV,
};
pub use error::ConfigError;
pub use loader::{load_config, load_config_file, parse_document};
pub use locate::resolve_location;
pub use merge::deep_merge;
pub use types::{CompilerOptions, TsConfig};
