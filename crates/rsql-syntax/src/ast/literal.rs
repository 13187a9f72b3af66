use serde::Serialize;
use std::fmt;

/// Argument token exactly as written in the filter. No type is assigned
/// until the value is coerced against a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum RawLiteral {
    /// Quoted string, quote markers included.
    QuotedString(String),
    Number(String),
    /// ISO-8601 date or timestamp.
    Date(String),
    /// Bare word such as `John` or `*oh*`.
    Unquoted(String),
}

impl RawLiteral {
    pub fn text(&self) -> &str {
        match self {
            RawLiteral::QuotedString(s)
            | RawLiteral::Number(s)
            | RawLiteral::Date(s)
            | RawLiteral::Unquoted(s) => s,
        }
    }
}

impl fmt::Display for RawLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
