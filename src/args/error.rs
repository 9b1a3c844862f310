use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgError {
    #[error("unknown argument '{0}'")]
    UnknownKey(String),

    #[error("missing value for argument '{0}'")]
    MissingValue(String),

    #[error("invalid value '{value}' for argument '{name}': expected a non-negative integer")]
    InvalidType { name: String, value: String },
}
