//! Streaming YAML config file loader.
//!
//! The document is consumed one parser event at a time. The loader tracks
//! which top-level section it is in and whether the next scalar is a key or a
//! value, and writes each value straight into the target [`AppConfig`].

use std::fmt;
use std::path::Path;

use yaml_rust2::parser::{Event, Parser};
use yaml_rust2::scanner::ScanError;

use super::model::{bounded, AppConfig, LONG_TEXT_CAPACITY, SHORT_TEXT_CAPACITY};
use super::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Database,
    Storage,
    Runtime,
}

impl Section {
    fn from_key(key: &str) -> Self {
        match key {
            "db" => Section::Database,
            "storage" => Section::Storage,
            "runtime" => Section::Runtime,
            _ => Section::None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::None => "top-level",
            Section::Database => "db",
            Section::Storage => "storage",
            Section::Runtime => "runtime",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ExpectKey,
    ExpectValue,
}

/// Loads the YAML file at `path` on top of the values already in `config`.
///
/// Keys absent from the file leave the existing values untouched. On error
/// the config may hold the values assigned before the failing key.
pub fn load_config_file(path: impl AsRef<Path>, config: &mut AppConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    load_config_str(&contents, config)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(())
}

/// Loads a YAML document held in memory. See [`load_config_file`].
pub fn load_config_str(source: &str, config: &mut AppConfig) -> Result<(), ConfigError> {
    let mut parser = Parser::new(source.chars());
    let mut loader = Loader::new(config);

    loop {
        let (event, _) = parser.next_token().map_err(syntax_error)?;
        if loader.handle(event)? {
            return Ok(());
        }
    }
}

struct Loader<'a> {
    config: &'a mut AppConfig,
    section: Section,
    phase: Phase,
    pending_key: String,
}

impl<'a> Loader<'a> {
    fn new(config: &'a mut AppConfig) -> Self {
        Self {
            config,
            section: Section::None,
            phase: Phase::ExpectKey,
            pending_key: String::new(),
        }
    }

    /// Feeds one event to the state machine. Returns `true` at end of stream.
    fn handle(&mut self, event: Event) -> Result<bool, ConfigError> {
        match event {
            Event::Scalar(value, ..) => match self.phase {
                Phase::ExpectKey => {
                    self.pending_key = value;
                    self.phase = Phase::ExpectValue;
                }
                Phase::ExpectValue => {
                    self.assign(&value)?;
                    self.phase = Phase::ExpectKey;
                }
            },
            Event::MappingStart(..) => {
                if self.phase == Phase::ExpectValue {
                    if self.section != Section::None {
                        return Err(ConfigError::ValidationError(format!(
                            "nested mappings are not supported ({} key '{}')",
                            self.section, self.pending_key
                        )));
                    }
                    self.section = Section::from_key(&self.pending_key);
                    if self.section == Section::None {
                        return Err(ConfigError::ValidationError(format!(
                            "unknown top-level key: {}",
                            self.pending_key
                        )));
                    }
                    self.phase = Phase::ExpectKey;
                    tracing::debug!(section = %self.section, key = %self.pending_key, "entered section");
                }
            }
            // Sections are one level deep, so any mapping end leaves the section.
            Event::MappingEnd => self.section = Section::None,
            Event::SequenceStart(..) => {
                return Err(ConfigError::ValidationError(format!(
                    "list values are not supported (key '{}')",
                    self.pending_key
                )));
            }
            Event::Alias(..) => {
                return Err(ConfigError::ValidationError(format!(
                    "aliases are not supported (key '{}')",
                    self.pending_key
                )));
            }
            Event::StreamEnd => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn assign(&mut self, value: &str) -> Result<(), ConfigError> {
        let key = self.pending_key.as_str();
        let config = &mut *self.config;

        match (self.section, key) {
            (Section::Database, "type") => config.db.db_type = bounded(value, SHORT_TEXT_CAPACITY),
            (Section::Database, "uri") => config.db.uri = bounded(value, LONG_TEXT_CAPACITY),
            (Section::Database, "timeout_seconds") => {
                config.db.timeout_seconds = parse_timeout(value)?;
            }
            (Section::Storage, "output_path") => {
                config.storage.output_path = bounded(value, LONG_TEXT_CAPACITY);
            }
            (Section::Storage, "compression") => {
                config.storage.compression = bounded(value, SHORT_TEXT_CAPACITY);
            }
            (Section::Storage, "remote_target") => {
                config.storage.remote_target = bounded(value, SHORT_TEXT_CAPACITY);
            }
            (Section::Storage, "encryption_key_path") => {
                config.storage.encryption_key_path = bounded(value, LONG_TEXT_CAPACITY);
            }
            (Section::Runtime, "log_level") => {
                config.runtime.log_level = parse_count("runtime.log_level", value)?;
            }
            (Section::Runtime, "thread_count") => {
                config.runtime.thread_count = parse_count("runtime.thread_count", value)?;
            }
            (Section::Runtime, "tmp_dir") => {
                config.runtime.temp_dir = bounded(value, LONG_TEXT_CAPACITY);
            }
            (section, key) => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown {section} key: {key}"
                )));
            }
        }
        Ok(())
    }
}

fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::ValidationError("db.timeout_seconds must be > 0".to_string());
    let seconds: i64 = value.trim().parse().map_err(|_| invalid())?;
    if seconds <= 0 {
        return Err(invalid());
    }
    u64::try_from(seconds).map_err(|_| invalid())
}

fn parse_count(field: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::ValidationError(format!(
            "{field} must be a non-negative integer, got '{value}'"
        ))
    })
}

/// The scanner reports 1-based lines and 0-based columns.
fn syntax_error(err: ScanError) -> ConfigError {
    let marker = err.marker();
    ConfigError::ParseError {
        message: err.info().to_string(),
        line: marker.line(),
        column: marker.col() + 1,
    }
}
