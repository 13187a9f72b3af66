use crate::{
    core::value::Value,
    schema::{error::SchemaError, property::PropertyDescriptor},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered property list of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl EntitySchema {
    pub fn new(
        name: impl Into<String>,
        properties: Vec<PropertyDescriptor>,
    ) -> Result<Self, SchemaError> {
        let schema = Self {
            name: name.into(),
            properties,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Exact, case-sensitive lookup.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    entity: self.name.clone(),
                    property: property.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Something a compiled filter can be evaluated against.
pub trait Entity {
    /// Current value of the named property, `Value::Null` when unset or
    /// unknown.
    fn property_value(&self, name: &str) -> Value;
}

/// An entity whose schema is known at compile time.
pub trait TypedEntity: Entity {
    const NAME: &'static str;

    fn properties() -> Vec<PropertyDescriptor>;

    fn schema() -> Result<EntitySchema, SchemaError> {
        EntitySchema::new(Self::NAME, Self::properties())
    }
}
