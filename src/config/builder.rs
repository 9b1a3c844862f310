use std::path::Path;

use super::model::AppConfig;
use super::source::{ArgsSource, ConfigSource, FileSource};
use super::ConfigError;
use crate::args::ParsedArguments;

/// Builder that layers configuration sources over a set of defaults.
///
/// Sources are applied in registration order, so later sources override
/// earlier ones. The first failing source aborts the build.
///
/// ## Example
///
/// ```no_run
/// use dbeetle_config::args::parse_arguments;
/// use dbeetle_config::config::{cli_schema, Config};
///
/// let args = parse_arguments(&cli_schema(), std::env::args())?;
/// let config = Config::builder()
///     .with_file("dbeetle.yaml")
///     .with_args(args)
///     .build()?;
///
/// println!("backing up {} every {}s", config.db.uri, config.db.timeout_seconds);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    defaults: AppConfig,
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a builder seeded with [`AppConfig::default`].
    pub fn builder() -> Self {
        Self::default()
    }

    /// Replaces the values every source is layered on.
    pub fn with_defaults(mut self, defaults: AppConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Adds a YAML config file. A missing file fails the build.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(FileSource::new(path))
    }

    /// Adds parsed command-line overrides.
    pub fn with_args(self, args: ParsedArguments) -> Self {
        self.with_source(ArgsSource::new(args))
    }

    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Applies every source to a copy of the defaults.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let mut config = self.defaults;
        for source in &self.sources {
            source.apply(&mut config)?;
        }
        Ok(config)
    }
}
