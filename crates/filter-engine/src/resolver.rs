use crate::naming::NamingConvention;
use dashmap::DashMap;
use model::schema::{EntitySchema, PropertyDescriptor};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Property '{field}' not found on '{entity}'")]
pub struct PropertyNotFound {
    pub entity: String,
    pub field: String,
}

/// Keyed by the convention's candidate name, so the map never holds more
/// entries than there are schema properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResolverKey {
    entity: String,
    candidate: String,
}

type Resolution = Result<PropertyDescriptor, PropertyNotFound>;

/// Maps field tokens to schema properties. Found descriptors are kept for
/// the resolver's lifetime; misses are recomputed on every call.
#[derive(Debug, Default)]
pub struct PropertyResolver {
    cache: DashMap<ResolverKey, PropertyDescriptor>,
}

impl PropertyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &self,
        schema: &EntitySchema,
        token: &str,
        convention: NamingConvention,
    ) -> Resolution {
        let key = ResolverKey {
            entity: schema.name.clone(),
            candidate: convention.candidate(token),
        };

        if let Some(hit) = self.cache.get(&key) {
            trace!("Resolver cache hit for {}.{} ({})", schema.name, token, convention);
            return Ok(hit.value().clone());
        }

        let descriptor = resolve_property(schema, token, convention)?;
        Ok(self.cache.entry(key).or_insert(descriptor).value().clone())
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Uncached resolution: exact, case-sensitive match of the convention's
/// candidate name.
pub fn resolve_property(
    schema: &EntitySchema,
    token: &str,
    convention: NamingConvention,
) -> Resolution {
    let candidate = convention.candidate(token);
    schema
        .property(&candidate)
        .cloned()
        .ok_or_else(|| PropertyNotFound {
            entity: schema.name.clone(),
            field: token.to_string(),
        })
}
