use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use super::field::Kind;

/// Failure to turn a raw string into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("invalid {kind} value: {source}")]
    InvalidInt { kind: Kind, source: ParseIntError },

    #[error("invalid {kind} value: {source}")]
    InvalidFloat {
        kind: Kind,
        source: ParseFloatError,
    },

    #[error("value '{raw}' is out of range for {kind}")]
    FloatOutOfRange { kind: Kind, raw: String },

    #[error("invalid boolean value '{0}'")]
    InvalidBool(String),

    #[error("unsupported kind: {0}")]
    Unsupported(Kind),
}

/// Failure to bind a structure.
///
/// `field` is the dotted path of the offending field, e.g. `api.access_key`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error("field '{field}' has unsupported type {kind}")]
    UnsupportedKind { field: String, kind: Kind },

    #[error("field '{field}': key '{key}' not found in section '{section}'")]
    MissingKey {
        field: String,
        section: String,
        key: String,
    },

    #[error("field '{field}': cannot coerce [{section}] {key}: {source}")]
    Coercion {
        field: String,
        section: String,
        key: String,
        source: CoerceError,
    },

    #[error("nested field '{field}' cannot carry section/key/default/omit metadata")]
    NestedMetadata { field: String },

    #[error("field '{field}' expected a {expected} value but got {found}")]
    KindMismatch {
        field: String,
        expected: Kind,
        found: Kind,
    },
}

impl BindError {
    /// Dotted path of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            BindError::UnsupportedKind { field, .. }
            | BindError::MissingKey { field, .. }
            | BindError::Coercion { field, .. }
            | BindError::NestedMetadata { field }
            | BindError::KindMismatch { field, .. } => field,
        }
    }
}
