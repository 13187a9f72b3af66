use crate::{
    cache::{CacheStats, PredicateCache, PredicateKey},
    coercion::{Coercion, coerce},
    error::{CompileError, Result},
    like::build_like_match,
    naming::NamingConvention,
    predicate::{CompareOp, CompiledPredicate, PredicateNode},
    resolver::PropertyResolver,
    settings::CompilerSettings,
};
use model::{
    core::{scalar_kind::ScalarKind, value::Value},
    schema::{Entity, EntitySchema, PropertyDescriptor, SchemaRegistry, TypedEntity},
};
use rsql_syntax::ast::{Comparator, Comparison, FilterNode};
use std::sync::Arc;
use tracing::debug;

/// Compiles filter text into predicates over registered entity schemas.
///
/// Owns the property resolver cache and, when enabled, the predicate cache.
/// Safe to share between threads.
#[derive(Debug)]
pub struct FilterCompiler {
    registry: SchemaRegistry,
    resolver: PropertyResolver,
    cache: Option<PredicateCache>,
    settings: CompilerSettings,
}

impl FilterCompiler {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self::with_settings(registry, CompilerSettings::default())
    }

    pub fn with_settings(registry: SchemaRegistry, settings: CompilerSettings) -> Self {
        let cache = settings
            .predicate_cache
            .enabled
            .then(|| PredicateCache::from_settings(&settings.predicate_cache));

        Self {
            registry,
            resolver: PropertyResolver::new(),
            cache,
            settings,
        }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &PropertyResolver {
        &self.resolver
    }

    pub fn predicate_cache(&self) -> Option<&PredicateCache> {
        self.cache.as_ref()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(PredicateCache::stats)
    }

    /// Parses and compiles `filter` for the named entity.
    pub fn compile<T: Entity + ?Sized>(
        &self,
        entity: &str,
        filter: &str,
        convention: NamingConvention,
    ) -> Result<CompiledPredicate<T>> {
        let build = || -> Result<PredicateNode> {
            let ast = rsql_syntax::parse(filter)?;
            let schema = self.schema(entity)?;
            let root = self.compile_tree(&schema, &ast, convention)?;
            debug!(
                "Compiled filter for {} ({} comparison(s), {}): {}",
                entity,
                ast.comparison_count(),
                convention,
                filter
            );
            Ok(root)
        };

        let root = match &self.cache {
            Some(cache) => {
                cache.get_or_insert_with(PredicateKey::new(entity, filter, convention), build)?
            }
            None => Arc::new(build()?),
        };

        Ok(CompiledPredicate::from_shared(root))
    }

    /// [`compile`](Self::compile) with the configured default convention.
    pub fn compile_default<T: Entity + ?Sized>(
        &self,
        entity: &str,
        filter: &str,
    ) -> Result<CompiledPredicate<T>> {
        self.compile(entity, filter, self.settings.default_naming)
    }

    pub fn compile_for<T: TypedEntity>(
        &self,
        filter: &str,
        convention: NamingConvention,
    ) -> Result<CompiledPredicate<T>> {
        self.compile(T::NAME, filter, convention)
    }

    /// Compiles an already parsed tree. Bypasses the predicate cache.
    pub fn compile_node<T: Entity + ?Sized>(
        &self,
        entity: &str,
        node: &FilterNode,
        convention: NamingConvention,
    ) -> Result<CompiledPredicate<T>> {
        let schema = self.schema(entity)?;
        let root = self.compile_tree(&schema, node, convention)?;
        Ok(CompiledPredicate::new(root))
    }

    fn schema(&self, entity: &str) -> Result<Arc<EntitySchema>> {
        self.registry
            .get(entity)
            .ok_or_else(|| CompileError::UnknownEntity(entity.to_string()))
    }

    fn compile_tree(
        &self,
        schema: &EntitySchema,
        node: &FilterNode,
        convention: NamingConvention,
    ) -> Result<PredicateNode> {
        match node {
            FilterNode::Or { children } => {
                self.fold(schema, children, convention, PredicateNode::or)
            }
            FilterNode::And { children } => {
                self.fold(schema, children, convention, PredicateNode::and)
            }
            FilterNode::Comparison(comparison) => {
                self.compile_comparison(schema, comparison, convention)
            }
        }
    }

    /// No children is the open filter; otherwise a left fold.
    fn fold(
        &self,
        schema: &EntitySchema,
        children: &[FilterNode],
        convention: NamingConvention,
        combine: fn(PredicateNode, PredicateNode) -> PredicateNode,
    ) -> Result<PredicateNode> {
        let mut compiled = children
            .iter()
            .map(|child| self.compile_tree(schema, child, convention));

        let Some(first) = compiled.next() else {
            return Ok(PredicateNode::Constant(true));
        };
        compiled.try_fold(first?, |acc, next| Ok(combine(acc, next?)))
    }

    fn compile_comparison(
        &self,
        schema: &EntitySchema,
        comparison: &Comparison,
        convention: NamingConvention,
    ) -> Result<PredicateNode> {
        let property = self
            .resolver
            .resolve(schema, &comparison.selector, convention)
            .map_err(|missing| CompileError::PropertyNotFound {
                entity: missing.entity,
                field: missing.field,
                span: comparison.span,
            })?;

        let kind = property.declared_type;
        let name = property.name.clone();

        match comparison.comparator {
            Comparator::IsNull | Comparator::NotNull => {
                if !property.accepts_null() {
                    return Err(invalid_for_type(comparison, kind));
                }
                let is_null = PredicateNode::IsNull { property: name };
                Ok(match comparison.comparator {
                    Comparator::NotNull => is_null.negate(),
                    _ => is_null,
                })
            }
            Comparator::IsTrue | Comparator::IsFalse => {
                if kind != ScalarKind::Bool {
                    return Err(invalid_for_type(comparison, kind));
                }
                Ok(PredicateNode::Compare {
                    property: name,
                    op: CompareOp::Eq,
                    value: Value::Boolean(comparison.comparator == Comparator::IsTrue),
                })
            }
            Comparator::Lt | Comparator::Le | Comparator::Gt | Comparator::Ge => {
                if !kind.is_ordered() {
                    return Err(invalid_for_type(comparison, kind));
                }
                let op = match comparison.comparator {
                    Comparator::Lt => CompareOp::Lt,
                    Comparator::Le => CompareOp::Le,
                    Comparator::Gt => CompareOp::Gt,
                    _ => CompareOp::Ge,
                };
                Ok(PredicateNode::Compare {
                    property: name,
                    op,
                    value: single_value(comparison, &property)?,
                })
            }
            Comparator::Eq | Comparator::Neq => {
                let op = match comparison.comparator {
                    Comparator::Eq => CompareOp::Eq,
                    _ => CompareOp::Neq,
                };
                Ok(PredicateNode::Compare {
                    property: name,
                    op,
                    value: single_value(comparison, &property)?,
                })
            }
            Comparator::Like => {
                if kind != ScalarKind::String {
                    return Err(invalid_for_type(comparison, kind));
                }
                let pattern = match single_value(comparison, &property)? {
                    Value::String(text) => build_like_match(&text),
                    other => {
                        return Err(invalid_value(comparison, kind, other.to_string()));
                    }
                };
                Ok(PredicateNode::Like {
                    property: name,
                    pattern,
                })
            }
            Comparator::In | Comparator::Out => {
                let values = coerced_values(comparison, &property)?;
                if values.is_empty() {
                    return Err(not_enough_arguments(comparison));
                }
                let within = PredicateNode::In {
                    property: name,
                    values,
                };
                Ok(match comparison.comparator {
                    Comparator::Out => within.negate(),
                    _ => within,
                })
            }
        }
    }
}

fn coerced_values(comparison: &Comparison, property: &PropertyDescriptor) -> Result<Vec<Value>> {
    match coerce(property.declared_type, &comparison.arguments) {
        Ok(Coercion::Values(values)) => Ok(values),
        // Types without literal forms never supply a value.
        Ok(Coercion::NotApplicable) => Ok(Vec::new()),
        Err(err) => Err(invalid_value(comparison, err.target, err.literal)),
    }
}

fn single_value(comparison: &Comparison, property: &PropertyDescriptor) -> Result<Value> {
    let mut values = coerced_values(comparison, property)?;
    match values.len() {
        0 => Err(not_enough_arguments(comparison)),
        1 => Ok(values.remove(0)),
        count => Err(CompileError::TooManyArguments {
            field: comparison.selector.clone(),
            comparator: comparison.comparator,
            count,
            span: comparison.span,
        }),
    }
}

fn not_enough_arguments(comparison: &Comparison) -> CompileError {
    CompileError::NotEnoughArguments {
        field: comparison.selector.clone(),
        comparator: comparison.comparator,
        span: comparison.span,
    }
}

fn invalid_for_type(comparison: &Comparison, declared_type: ScalarKind) -> CompileError {
    CompileError::InvalidComparatorForType {
        field: comparison.selector.clone(),
        comparator: comparison.comparator,
        declared_type,
        span: comparison.span,
    }
}

fn invalid_value(comparison: &Comparison, declared_type: ScalarKind, literal: String) -> CompileError {
    CompileError::InvalidValue {
        field: comparison.selector.clone(),
        comparator: comparison.comparator,
        literal,
        declared_type,
        span: comparison.span,
    }
}
