//! Conversion of raw strings into typed leaf values.

use std::num::{ParseFloatError, ParseIntError};

use super::error::CoerceError;
use super::field::{Kind, Value};

/// Parses `raw` as a value of `kind`.
///
/// Floats are parsed at their declared precision. Struct, array,
/// indirection and complex kinds always fail with
/// [`CoerceError::Unsupported`].
pub fn coerce(raw: &str, kind: Kind) -> Result<Value, CoerceError> {
    match kind {
        Kind::String => Ok(Value::Str(raw.to_string())),
        Kind::I8 => raw.parse().map(Value::I8).map_err(int_error(kind)),
        Kind::I16 => raw.parse().map(Value::I16).map_err(int_error(kind)),
        Kind::I32 => raw.parse().map(Value::I32).map_err(int_error(kind)),
        Kind::I64 => raw.parse().map(Value::I64).map_err(int_error(kind)),
        Kind::F32 => {
            let value: f32 = raw.parse().map_err(float_error(kind))?;
            check_float_range(raw, value.is_infinite(), kind)?;
            Ok(Value::F32(value))
        }
        Kind::F64 => {
            let value: f64 = raw.parse().map_err(float_error(kind))?;
            check_float_range(raw, value.is_infinite(), kind)?;
            Ok(Value::F64(value))
        }
        Kind::Bool => parse_bool(raw).map(Value::Bool),
        Kind::Struct | Kind::Array | Kind::Indirection | Kind::Complex64 | Kind::Complex128 => {
            Err(CoerceError::Unsupported(kind))
        }
    }
}

fn int_error(kind: Kind) -> impl FnOnce(ParseIntError) -> CoerceError {
    move |source| CoerceError::InvalidInt { kind, source }
}

fn float_error(kind: Kind) -> impl FnOnce(ParseFloatError) -> CoerceError {
    move |source| CoerceError::InvalidFloat { kind, source }
}

/// Rejects finite literals that overflowed to infinity at this width.
fn check_float_range(raw: &str, infinite: bool, kind: Kind) -> Result<(), CoerceError> {
    if !infinite {
        return Ok(());
    }
    let unsigned = raw.trim_start_matches(['+', '-']).to_ascii_lowercase();
    if unsigned == "inf" || unsigned == "infinity" {
        return Ok(());
    }
    Err(CoerceError::FloatOutOfRange {
        kind,
        raw: raw.to_string(),
    })
}

fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::InvalidBool(raw.to_string())),
    }
}
