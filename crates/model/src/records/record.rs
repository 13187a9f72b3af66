use crate::{
    core::value::{Value, ValueError},
    schema::{Entity, EntitySchema},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

/// A dynamically typed entity instance, e.g. one object of a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Expected a JSON object for entity '{0}'")]
    NotAnObject(String),

    #[error("Invalid value for '{entity}.{field}': {source}")]
    Field {
        entity: String,
        field: String,
        #[source]
        source: ValueError,
    },
}

impl Record {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        Record {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .map(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    /// Reads a JSON object using the schema's declared kinds. Properties
    /// missing from the object are null; keys the schema does not declare
    /// are skipped.
    pub fn from_json(schema: &EntitySchema, json: &serde_json::Value) -> Result<Self, RecordError> {
        let object = json
            .as_object()
            .ok_or_else(|| RecordError::NotAnObject(schema.name.clone()))?;

        let mut field_values = Vec::with_capacity(schema.properties.len());
        for property in &schema.properties {
            let value = match object.get(&property.name) {
                Some(raw) => Value::from_json(property.declared_type, raw).map_err(|source| {
                    RecordError::Field {
                        entity: schema.name.clone(),
                        field: property.name.clone(),
                        source,
                    }
                })?,
                None => Value::Null,
            };
            field_values.push(FieldValue {
                name: property.name.clone(),
                value,
            });
        }

        for key in object.keys() {
            if schema.property(key).is_none() {
                debug!("Ignoring undeclared field '{}' on '{}'", key, schema.name);
            }
        }

        Ok(Record::new(&schema.name, field_values))
    }
}

impl Entity for Record {
    fn property_value(&self, name: &str) -> Value {
        self.get_value(name)
    }
}
