use bigdecimal::BigDecimal;
use model::core::{scalar_kind::ScalarKind, utils::parse_iso8601, value::Value};
use rsql_syntax::ast::RawLiteral;
use std::str::FromStr;
use thiserror::Error;

/// Result of coercing comparison arguments against a declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// Literals of the matching form, in source order. May be empty.
    Values(Vec<Value>),
    /// The declared type takes no literal arguments (Bool, complex types).
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{literal}' is not a valid {target}")]
pub struct CoercionError {
    pub literal: String,
    pub target: ScalarKind,
}

/// Converts raw literals to values of `kind`.
///
/// Literal forms that do not belong to the target type are skipped rather
/// than reinterpreted: a number never becomes a string and a quoted string
/// never becomes a number. A literal of the right form that cannot be
/// represented (an overflowing integer, an impossible date) is an error.
pub fn coerce(kind: ScalarKind, literals: &[RawLiteral]) -> Result<Coercion, CoercionError> {
    if matches!(kind, ScalarKind::Bool | ScalarKind::Other) {
        return Ok(Coercion::NotApplicable);
    }

    let mut values = Vec::with_capacity(literals.len());

    for literal in literals {
        let value = match (kind, literal) {
            (ScalarKind::String, RawLiteral::QuotedString(text)) => {
                Some(Value::String(unquote(text)))
            }
            (ScalarKind::String, RawLiteral::Unquoted(text)) => Some(Value::String(text.clone())),
            (ScalarKind::Int16, RawLiteral::Number(text)) => {
                Some(Value::Int16(parse_number(text, kind)?))
            }
            (ScalarKind::Int32, RawLiteral::Number(text)) => {
                Some(Value::Int32(parse_number(text, kind)?))
            }
            (ScalarKind::Int64, RawLiteral::Number(text)) => {
                Some(Value::Int64(parse_number(text, kind)?))
            }
            (ScalarKind::Float32, RawLiteral::Number(text)) => {
                Some(Value::Float32(parse_number(text, kind)?))
            }
            (ScalarKind::Float64, RawLiteral::Number(text)) => {
                Some(Value::Float64(parse_number(text, kind)?))
            }
            (ScalarKind::Decimal, RawLiteral::Number(text)) => {
                Some(Value::Decimal(parse_number::<BigDecimal>(text, kind)?))
            }
            (ScalarKind::DateTime, RawLiteral::Date(text)) => {
                let parsed = parse_iso8601(text).ok_or_else(|| CoercionError {
                    literal: text.clone(),
                    target: kind,
                })?;
                Some(Value::DateTime(parsed))
            }
            _ => None,
        };

        if let Some(value) = value {
            values.push(value);
        }
    }

    Ok(Coercion::Values(values))
}

fn parse_number<N: FromStr>(text: &str, target: ScalarKind) -> Result<N, CoercionError> {
    text.parse::<N>().map_err(|_| CoercionError {
        literal: text.to_string(),
        target,
    })
}

/// Strips the surrounding quote markers and unescapes the quote character.
/// Other backslash sequences (such as an escaped wildcard) are kept.
fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let inner = chars.as_str();
    let inner = inner.strip_suffix(quote).unwrap_or(inner);

    let mut out = String::with_capacity(inner.len());
    let mut rest = inner.chars().peekable();
    while let Some(c) = rest.next() {
        if c == '\\' {
            match rest.peek() {
                Some(&next) if next == quote || next == '\\' => {
                    out.push(next);
                    rest.next();
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}
