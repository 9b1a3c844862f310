//! The resolved configuration and its compiled-in defaults.

use serde::{Deserialize, Serialize};

/// Capacity of short text fields (database type, compression, remote target).
pub const SHORT_TEXT_CAPACITY: usize = 64;

/// Capacity of long text fields (URIs and filesystem paths).
pub const LONG_TEXT_CAPACITY: usize = 256;

/// Effective configuration of the backup tool.
///
/// Serialized key names match the keys of the YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub db: DatabaseConfig,
    pub storage: StorageConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: String,
    pub uri: String,
    pub timeout_seconds: u64,
    pub incremental_enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "sqlite".into(),
            uri: "sqlite://dbeetle.db".into(),
            timeout_seconds: 30,
            incremental_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub output_path: String,
    pub compression: String,
    pub encryption_key_path: String,
    pub remote_target: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_path: "./backups".into(),
            compression: "none".into(),
            encryption_key_path: String::new(),
            remote_target: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub log_level: u64,
    pub thread_count: u64,
    #[serde(rename = "tmp_dir")]
    pub temp_dir: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: 2,
            thread_count: 4,
            temp_dir: "/tmp".into(),
        }
    }
}

/// Copies `value` into a text field holding at most `capacity` characters.
pub(crate) fn bounded(value: &str, capacity: usize) -> String {
    match value.char_indices().nth(capacity) {
        Some((end, _)) => value[..end].to_string(),
        None => value.to_string(),
    }
}
