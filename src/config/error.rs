use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("value at '{0}' is not a scalar")]
    NonScalarValue(String),

    #[error("failed to serialize store: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("circular reference detected in configuration")]
    CircularReference,

    #[error("referenced key not found: {0}")]
    ReferenceNotFound(String),

    #[error("invalid reference path: {0}")]
    InvalidReferencePath(String),

    #[error("unclosed reference (missing '}}')")]
    UnclosedReference,
}
