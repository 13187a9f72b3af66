use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Property '{property}' is declared twice on entity '{entity}'")]
    DuplicateProperty { entity: String, property: String },

    #[error("Entity '{0}' is already registered")]
    DuplicateEntity(String),

    #[error("Failed to read schema document: {0}")]
    Document(String),
}
