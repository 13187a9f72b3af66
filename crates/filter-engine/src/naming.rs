use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// How an incoming field token maps onto a schema property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Token is the property name.
    #[default]
    AsIs,
    /// `userName` -> `UserName`
    CamelCase,
    /// `user_name` -> `UserName`
    SnakeCase,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown naming convention: {0} (expected as_is, camel_case or snake_case)")]
pub struct UnknownNamingConvention(pub String);

impl NamingConvention {
    /// Property name to look up for `token`.
    pub fn candidate(&self, token: &str) -> String {
        match self {
            NamingConvention::AsIs => token.to_string(),
            NamingConvention::CamelCase => upper_first(token),
            NamingConvention::SnakeCase => token
                .split('_')
                .filter(|segment| !segment.is_empty())
                .map(upper_first)
                .collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NamingConvention::AsIs => "as_is",
            NamingConvention::CamelCase => "camel_case",
            NamingConvention::SnakeCase => "snake_case",
        }
    }
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FromStr for NamingConvention {
    type Err = UnknownNamingConvention;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "as_is" | "asis" => Ok(NamingConvention::AsIs),
            "camel_case" | "camel" | "camelcase" => Ok(NamingConvention::CamelCase),
            "snake_case" | "snake" | "snakecase" => Ok(NamingConvention::SnakeCase),
            _ => Err(UnknownNamingConvention(s.to_string())),
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
