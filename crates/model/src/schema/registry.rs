use crate::schema::{
    entity::{EntitySchema, TypedEntity},
    error::SchemaError,
};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

/// Entity schemas known to the process, built once at startup.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    entities: HashMap<String, Arc<EntitySchema>>,
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    entities: Vec<EntitySchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: EntitySchema) -> Result<(), SchemaError> {
        schema.validate()?;
        if self.entities.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateEntity(schema.name));
        }

        debug!(
            "Registered entity '{}' with {} properties",
            schema.name,
            schema.properties.len()
        );
        self.entities.insert(schema.name.clone(), Arc::new(schema));
        Ok(())
    }

    pub fn register_type<T: TypedEntity>(&mut self) -> Result<(), SchemaError> {
        self.register(T::schema()?)
    }

    pub fn with_type<T: TypedEntity>(mut self) -> Result<Self, SchemaError> {
        self.register_type::<T>()?;
        Ok(self)
    }

    /// Builds a registry from a JSON document of the form
    /// `{"entities": [{"name": "...", "properties": [...]}]}`.
    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument =
            serde_json::from_str(source).map_err(|e| SchemaError::Document(e.to_string()))?;

        let mut registry = Self::new();
        for schema in document.entities {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    pub fn get(&self, entity: &str) -> Option<Arc<EntitySchema>> {
        self.entities.get(entity).cloned()
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
