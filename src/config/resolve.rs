//! Resolution of the effective configuration from defaults, a config file and
//! command-line overrides.
//!
//! Precedence is fixed: command-line flags win over the config file, which
//! wins over the compiled-in defaults.

use super::builder::Config;
use super::model::AppConfig;
use crate::args::{parse_arguments, FlagSchema, ValueType};
use crate::Error;

/// Flag naming the YAML config file. Resolution fails without it.
pub const CONFIG_PATH_FLAG: &str = "config";

/// Flags accepted by [`resolve_config`].
pub fn cli_schema() -> FlagSchema {
    FlagSchema::new()
        .with_flag("db_type", ValueType::String)
        .with_flag("db_uri", ValueType::String)
        .with_flag("db_timeout_seconds", ValueType::Int)
        .with_flag("storage_compression", ValueType::String)
        .with_flag("storage_remote_target", ValueType::String)
        .with_flag("storage_output_path", ValueType::String)
        .with_flag("storage_encryption_key_path", ValueType::String)
        .with_flag("runtime_log_level", ValueType::Int)
        .with_flag("runtime_thread_count", ValueType::Int)
        .with_flag("runtime_tmp_dir", ValueType::String)
        .with_flag(CONFIG_PATH_FLAG, ValueType::String)
}

/// Resolves the configuration with the compiled-in defaults.
///
/// `argv` is the full argument vector, program name first.
///
/// ```no_run
/// let config = dbeetle_config::resolve_config(std::env::args())?;
/// # Ok::<(), dbeetle_config::Error>(())
/// ```
pub fn resolve_config<I, S>(argv: I) -> Result<AppConfig, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Resolver::new().resolve(argv)
}

/// Resolves the configuration on top of caller-supplied defaults.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Resolver {
    defaults: AppConfig,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: AppConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Parses `argv`, loads the file named by `--config` and applies the
    /// remaining flags as overrides. Stops at the first error.
    pub fn resolve<I, S>(self, argv: I) -> Result<AppConfig, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args = parse_arguments(&cli_schema(), argv)?;

        let path = args
            .get_str(CONFIG_PATH_FLAG)
            .ok_or(Error::MissingConfigPath(CONFIG_PATH_FLAG))?
            .to_string();

        tracing::debug!(path = %path, overrides = args.len() - 1, "resolving configuration");

        let config = Config::builder()
            .with_defaults(self.defaults)
            .with_file(path)
            .with_args(args)
            .build()?;

        Ok(config)
    }
}
