//! Layered configuration for the dbeetle backup tool.
//!
//! The effective [`AppConfig`] is built from compiled-in defaults, a YAML
//! config file and `--name=value` command-line overrides, in that order of
//! increasing precedence.

pub mod args;
pub mod config;
mod error;

pub use config::{resolve_config, AppConfig, Config, ConfigError, Resolver};
pub use error::Error;
