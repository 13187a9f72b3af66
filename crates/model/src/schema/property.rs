use crate::core::scalar_kind::ScalarKind;
use serde::{Deserialize, Serialize};

/// A declared property of an entity schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: ScalarKind,
    #[serde(default)]
    pub nullable: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, declared_type: ScalarKind) -> Self {
        Self {
            name: name.into(),
            declared_type,
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>, declared_type: ScalarKind) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, declared_type)
        }
    }

    /// Whether a null test is meaningful for this property.
    pub fn accepts_null(&self) -> bool {
        self.nullable || self.declared_type.is_reference()
    }
}
