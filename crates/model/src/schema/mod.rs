pub mod entity;
pub mod error;
pub mod property;
pub mod registry;

pub use entity::{Entity, EntitySchema, TypedEntity};
pub use error::SchemaError;
pub use property::PropertyDescriptor;
pub use registry::SchemaRegistry;
