use crate::args::ArgError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for configuration resolution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("argument error: {0}")]
    Args(#[from] ArgError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("missing required argument '--{0}=<path>'")]
    MissingConfigPath(&'static str),
}
