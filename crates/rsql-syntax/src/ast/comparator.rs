use serde::Serialize;
use std::{fmt, str::FromStr};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    IsNull,
    NotNull,
    IsTrue,
    IsFalse,
    Like,
    In,
    Out,
}

/// Token that is not one of the known comparators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComparatorToken(pub String);

impl FromStr for Comparator {
    type Err = UnknownComparatorToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let comparator = match token {
            "==" => Comparator::Eq,
            "!=" => Comparator::Neq,
            "<" => Comparator::Lt,
            "<=" => Comparator::Le,
            ">" => Comparator::Gt,
            ">=" => Comparator::Ge,
            named => match named.to_ascii_lowercase().as_str() {
                "=eq=" => Comparator::Eq,
                "=neq=" | "=ne=" => Comparator::Neq,
                "=lt=" => Comparator::Lt,
                "=le=" => Comparator::Le,
                "=gt=" => Comparator::Gt,
                "=ge=" => Comparator::Ge,
                "=isnull=" => Comparator::IsNull,
                "=isnotnull=" | "=notnull=" => Comparator::NotNull,
                "=istrue=" => Comparator::IsTrue,
                "=isfalse=" => Comparator::IsFalse,
                "=lk=" | "=like=" => Comparator::Like,
                "=in=" => Comparator::In,
                "=out=" => Comparator::Out,
                _ => return Err(UnknownComparatorToken(token.to_string())),
            },
        };
        Ok(comparator)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Eq => write!(f, "=="),
            Comparator::Neq => write!(f, "!="),
            Comparator::Lt => write!(f, "<"),
            Comparator::Le => write!(f, "<="),
            Comparator::Gt => write!(f, ">"),
            Comparator::Ge => write!(f, ">="),
            Comparator::IsNull => write!(f, "=isnull="),
            Comparator::NotNull => write!(f, "=isnotnull="),
            Comparator::IsTrue => write!(f, "=istrue="),
            Comparator::IsFalse => write!(f, "=isfalse="),
            Comparator::Like => write!(f, "=lk="),
            Comparator::In => write!(f, "=in="),
            Comparator::Out => write!(f, "=out="),
        }
    }
}
