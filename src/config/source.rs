//! Layers that can be applied on top of an [`AppConfig`].

use std::path::{Path, PathBuf};

use super::file::load_config_file;
use super::model::{bounded, AppConfig, LONG_TEXT_CAPACITY, SHORT_TEXT_CAPACITY};
use super::ConfigError;
use crate::args::{ArgValue, ParsedArguments};

pub trait ConfigSource: std::fmt::Debug {
    fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError>;
}

/// A YAML config file. The file is required.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigSource for FileSource {
    fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        load_config_file(&self.path, config)
    }
}

/// Command-line overrides, keyed by the flag names of
/// [`cli_schema`](crate::config::cli_schema).
///
/// Flags that don't name a config field (such as the config path) are
/// skipped. Values are copied as-is; nothing is re-validated.
#[derive(Debug, Clone)]
pub struct ArgsSource {
    args: ParsedArguments,
}

impl ArgsSource {
    pub fn new(args: ParsedArguments) -> Self {
        Self { args }
    }
}

impl ConfigSource for ArgsSource {
    fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        for arg in &self.args {
            let applied = match &arg.value {
                ArgValue::Int(n) => apply_int(config, &arg.name, *n),
                ArgValue::String(s) => apply_text(config, &arg.name, s),
                ArgValue::Bool(_) => false,
            };
            if applied {
                tracing::debug!(flag = %arg.name, "applied command-line override");
            }
        }
        Ok(())
    }
}

fn apply_int(config: &mut AppConfig, name: &str, value: u64) -> bool {
    match name {
        "db_timeout_seconds" => {
            if value == 0 {
                tracing::warn!("command-line override sets db.timeout_seconds to 0");
            }
            config.db.timeout_seconds = value;
        }
        "runtime_log_level" => config.runtime.log_level = value,
        "runtime_thread_count" => config.runtime.thread_count = value,
        _ => return false,
    }
    true
}

fn apply_text(config: &mut AppConfig, name: &str, value: &str) -> bool {
    match name {
        "db_type" => config.db.db_type = bounded(value, SHORT_TEXT_CAPACITY),
        "db_uri" => config.db.uri = bounded(value, LONG_TEXT_CAPACITY),
        "storage_compression" => config.storage.compression = bounded(value, SHORT_TEXT_CAPACITY),
        "storage_remote_target" => {
            config.storage.remote_target = bounded(value, SHORT_TEXT_CAPACITY);
        }
        "storage_output_path" => config.storage.output_path = bounded(value, LONG_TEXT_CAPACITY),
        "storage_encryption_key_path" => {
            config.storage.encryption_key_path = bounded(value, LONG_TEXT_CAPACITY);
        }
        "runtime_tmp_dir" => config.runtime.temp_dir = bounded(value, LONG_TEXT_CAPACITY),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_arguments;
    use crate::config::cli_schema;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(argv: &[&str]) -> ArgsSource {
        ArgsSource::new(parse_arguments(&cli_schema(), argv).unwrap())
    }

    #[test]
    fn test_file_source_applies_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "runtime:\n  thread_count: 2").unwrap();

        let mut config = AppConfig::default();
        FileSource::new(file.path()).apply(&mut config).unwrap();
        assert_eq!(config.runtime.thread_count, 2);
    }

    #[test]
    fn test_file_source_required_missing() {
        let mut config = AppConfig::default();
        let result = FileSource::new("/nonexistent/path/config.yaml").apply(&mut config);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_args_source_overrides_every_field() {
        let mut config = AppConfig::default();
        args(&[
            "prog",
            "--db_type=postgres",
            "--db_uri=postgres://db",
            "--db_timeout_seconds=60",
            "--storage_compression=zstd",
            "--storage_remote_target=s3://b",
            "--storage_output_path=/out",
            "--storage_encryption_key_path=/key",
            "--runtime_log_level=5",
            "--runtime_thread_count=8",
            "--runtime_tmp_dir=/scratch",
            "--config=ignored.yaml",
        ])
        .apply(&mut config)
        .unwrap();

        assert_eq!(config.db.db_type, "postgres");
        assert_eq!(config.db.uri, "postgres://db");
        assert_eq!(config.db.timeout_seconds, 60);
        assert_eq!(config.storage.compression, "zstd");
        assert_eq!(config.storage.remote_target, "s3://b");
        assert_eq!(config.storage.output_path, "/out");
        assert_eq!(config.storage.encryption_key_path, "/key");
        assert_eq!(config.runtime.log_level, 5);
        assert_eq!(config.runtime.thread_count, 8);
        assert_eq!(config.runtime.temp_dir, "/scratch");
    }

    #[test]
    fn test_args_source_does_not_revalidate_timeout() {
        let mut config = AppConfig::default();
        args(&["prog", "--db_timeout_seconds=0"])
            .apply(&mut config)
            .unwrap();
        assert_eq!(config.db.timeout_seconds, 0);
    }

    #[test]
    fn test_args_source_truncates_text() {
        let long = format!("--db_type={}", "p".repeat(100));
        let mut config = AppConfig::default();
        args(&["prog", &long]).apply(&mut config).unwrap();
        assert_eq!(config.db.db_type.len(), SHORT_TEXT_CAPACITY);
    }
}
