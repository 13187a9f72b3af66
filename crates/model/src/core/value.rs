use crate::core::{scalar_kind::ScalarKind, utils::parse_iso8601};
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(BigDecimal),
    DateTime(NaiveDateTime),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Null,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("Cannot read {found} as {expected}")]
    TypeMismatch { expected: ScalarKind, found: String },

    #[error("Value '{value}' is out of range for {expected}")]
    OutOfRange { expected: ScalarKind, value: String },
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int16(v) => Some(f64::from(*v)),
            Value::Int32(v) => Some(f64::from(*v)),
            Value::Int64(v) => Some(*v as f64),
            Value::Float32(v) => Some(f64::from(*v)),
            Value::Float64(v) => Some(*v),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<BigDecimal> {
        match self {
            Value::Decimal(d) => Some(d.clone()),
            Value::Float32(v) => BigDecimal::from_f32(*v),
            Value::Float64(v) => BigDecimal::from_f64(*v),
            other => other.as_i64().map(BigDecimal::from),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Json(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            Value::Json(v) => v.as_bool(),
            _ => None,
        }
    }

    /// Orders two values. Numbers compare across widths (integers exactly,
    /// decimals through `BigDecimal`, floats through `f64`). Returns `None`
    /// when the values are not comparable, including any comparison with
    /// `Null`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => None,
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (Float32(a), Float32(b)) => a.partial_cmp(b),
            (Json(a), Json(b)) => (a == b).then_some(Ordering::Equal),
            (Decimal(_), _) | (_, Decimal(_)) => {
                let left = self.as_decimal()?;
                let right = other.as_decimal()?;
                Some(left.cmp(&right))
            }
            _ => match (self.as_i64(), other.as_i64()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => {
                    let left = self.as_f64()?;
                    let right = other.as_f64()?;
                    left.partial_cmp(&right)
                }
            },
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            Value::Int16(_) => ScalarKind::Int16,
            Value::Int32(_) => ScalarKind::Int32,
            Value::Int64(_) => ScalarKind::Int64,
            Value::Float32(_) => ScalarKind::Float32,
            Value::Float64(_) => ScalarKind::Float64,
            Value::Decimal(_) => ScalarKind::Decimal,
            Value::DateTime(_) => ScalarKind::DateTime,
            Value::String(_) => ScalarKind::String,
            Value::Boolean(_) => ScalarKind::Bool,
            Value::Json(_) | Value::Null => ScalarKind::Other,
        }
    }

    /// Reads a JSON value as the given declared kind. JSON `null` always
    /// yields `Value::Null`; complex kinds keep the raw JSON.
    pub fn from_json(kind: ScalarKind, json: &serde_json::Value) -> Result<Value, ValueError> {
        use serde_json::Value as Json;

        if json.is_null() {
            return Ok(Value::Null);
        }

        let mismatch = || ValueError::TypeMismatch {
            expected: kind,
            found: json.to_string(),
        };
        let out_of_range = || ValueError::OutOfRange {
            expected: kind,
            value: json.to_string(),
        };

        match kind {
            ScalarKind::String => json
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(mismatch),
            ScalarKind::Bool => json.as_bool().map(Value::Boolean).ok_or_else(mismatch),
            ScalarKind::Int16 => {
                let raw = json.as_i64().ok_or_else(mismatch)?;
                i16::try_from(raw)
                    .map(Value::Int16)
                    .map_err(|_| out_of_range())
            }
            ScalarKind::Int32 => {
                let raw = json.as_i64().ok_or_else(mismatch)?;
                i32::try_from(raw)
                    .map(Value::Int32)
                    .map_err(|_| out_of_range())
            }
            ScalarKind::Int64 => json.as_i64().map(Value::Int64).ok_or_else(mismatch),
            ScalarKind::Float32 => json
                .as_f64()
                .map(|v| Value::Float32(v as f32))
                .ok_or_else(mismatch),
            ScalarKind::Float64 => json.as_f64().map(Value::Float64).ok_or_else(mismatch),
            ScalarKind::Decimal => match json {
                Json::Number(n) => BigDecimal::from_str(&n.to_string())
                    .map(Value::Decimal)
                    .map_err(|_| mismatch()),
                Json::String(s) => BigDecimal::from_str(s)
                    .map(Value::Decimal)
                    .map_err(|_| mismatch()),
                _ => Err(mismatch()),
            },
            ScalarKind::DateTime => json
                .as_str()
                .and_then(parse_iso8601)
                .map(Value::DateTime)
                .ok_or_else(mismatch),
            ScalarKind::Other => Ok(Value::Json(json.clone())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "\\'")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Json(v) => write!(f, "{v}"),
            Value::Null => write!(f, "null"),
        }
    }
}
