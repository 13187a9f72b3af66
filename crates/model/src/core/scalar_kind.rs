use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Declared type of an entity property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScalarKind {
    String,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    DateTime,
    Bool,
    Other,
}

lazy_static! {
    static ref TYPE_NAME_MAP: HashMap<&'static str, ScalarKind> = build_type_name_map();
}

impl ScalarKind {
    /// Maps a schema type name (case-insensitive) to a kind. Unknown names
    /// are treated as complex types.
    pub fn from_type_name(type_name: &str) -> Self {
        let normalized = Self::normalize_type_name(type_name);
        TYPE_NAME_MAP
            .get(normalized.as_str())
            .copied()
            .unwrap_or(ScalarKind::Other)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Bool => "bool",
            ScalarKind::Other => "other",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ScalarKind::Int16 | ScalarKind::Int32 | ScalarKind::Int64
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                ScalarKind::Float32 | ScalarKind::Float64 | ScalarKind::Decimal
            )
    }

    /// Kinds that support `<`, `<=`, `>` and `>=`.
    pub fn is_ordered(&self) -> bool {
        self.is_numeric() || *self == ScalarKind::DateTime
    }

    /// Kinds whose values are references and can therefore always be null.
    pub fn is_reference(&self) -> bool {
        matches!(self, ScalarKind::String | ScalarKind::Other)
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_lowercase()
    }
}

impl From<String> for ScalarKind {
    fn from(value: String) -> Self {
        ScalarKind::from_type_name(&value)
    }
}

impl From<ScalarKind> for String {
    fn from(kind: ScalarKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn build_type_name_map() -> HashMap<&'static str, ScalarKind> {
    let mut map = HashMap::new();

    for name in ["string", "str", "text", "varchar", "char"] {
        map.insert(name, ScalarKind::String);
    }
    for name in ["int16", "i16", "short", "smallint"] {
        map.insert(name, ScalarKind::Int16);
    }
    for name in ["int32", "i32", "int", "integer"] {
        map.insert(name, ScalarKind::Int32);
    }
    for name in ["int64", "i64", "long", "bigint"] {
        map.insert(name, ScalarKind::Int64);
    }
    for name in ["float32", "f32", "float", "single", "real"] {
        map.insert(name, ScalarKind::Float32);
    }
    for name in ["float64", "f64", "double"] {
        map.insert(name, ScalarKind::Float64);
    }
    for name in ["decimal", "numeric", "money"] {
        map.insert(name, ScalarKind::Decimal);
    }
    for name in ["datetime", "timestamp", "date"] {
        map.insert(name, ScalarKind::DateTime);
    }
    for name in ["bool", "boolean"] {
        map.insert(name, ScalarKind::Bool);
    }

    map
}
