//! Configuration model, YAML loading and layered resolution.

mod builder;
mod error;
mod file;
mod model;
mod resolve;
mod source;

pub use builder::Config;
pub use error::ConfigError;
pub use file::{load_config_file, load_config_str};
pub use model::{
    AppConfig, DatabaseConfig, RuntimeConfig, StorageConfig, LONG_TEXT_CAPACITY,
    SHORT_TEXT_CAPACITY,
};
pub use resolve::{cli_schema, resolve_config, Resolver, CONFIG_PATH_FLAG};
pub use source::{ArgsSource, ConfigSource, FileSource};
