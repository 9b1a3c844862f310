use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("{0}")]
    ValidationError(String),
}

impl ConfigError {
    /// 1-based source line of a YAML syntax error, 0 for every other error.
    pub fn line(&self) -> usize {
        match self {
            ConfigError::ParseError { line, .. } => *line,
            _ => 0,
        }
    }

    /// 1-based source column of a YAML syntax error, 0 for every other error.
    pub fn column(&self) -> usize {
        match self {
            ConfigError::ParseError { column, .. } => *column,
            _ => 0,
        }
    }
}
