use crate::like::LikeMatch;
use model::{core::value::Value, schema::Entity};
use std::{cmp::Ordering, fmt, marker::PhantomData, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn holds(&self, actual: &Value, expected: &Value) -> bool {
        let ordering = actual.compare(expected);
        match self {
            CompareOp::Eq => ordering == Some(Ordering::Equal),
            CompareOp::Neq => ordering != Some(Ordering::Equal),
            CompareOp::Lt => ordering == Some(Ordering::Less),
            CompareOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            CompareOp::Gt => ordering == Some(Ordering::Greater),
            CompareOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

/// Structural predicate tree produced by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    Constant(bool),
    And(Box<PredicateNode>, Box<PredicateNode>),
    Or(Box<PredicateNode>, Box<PredicateNode>),
    Not(Box<PredicateNode>),
    Compare {
        property: String,
        op: CompareOp,
        value: Value,
    },
    IsNull {
        property: String,
    },
    Like {
        property: String,
        pattern: LikeMatch,
    },
    In {
        property: String,
        values: Vec<Value>,
    },
}

impl PredicateNode {
    pub fn and(self, other: PredicateNode) -> PredicateNode {
        PredicateNode::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: PredicateNode) -> PredicateNode {
        PredicateNode::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> PredicateNode {
        PredicateNode::Not(Box::new(self))
    }

    /// Evaluates against one entity. A null property value never equals,
    /// orders, matches or belongs to anything.
    pub fn evaluate<E: Entity + ?Sized>(&self, entity: &E) -> bool {
        match self {
            PredicateNode::Constant(value) => *value,
            PredicateNode::And(left, right) => left.evaluate(entity) && right.evaluate(entity),
            PredicateNode::Or(left, right) => left.evaluate(entity) || right.evaluate(entity),
            PredicateNode::Not(inner) => !inner.evaluate(entity),
            PredicateNode::Compare {
                property,
                op,
                value,
            } => op.holds(&entity.property_value(property), value),
            PredicateNode::IsNull { property } => entity.property_value(property).is_null(),
            PredicateNode::Like { property, pattern } => entity
                .property_value(property)
                .as_str()
                .is_some_and(|text| pattern.matches(text)),
            PredicateNode::In { property, values } => {
                let actual = entity.property_value(property);
                values.iter().any(|candidate| actual.equal(candidate))
            }
        }
    }
}

impl fmt::Display for PredicateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateNode::Constant(value) => write!(f, "{value}"),
            PredicateNode::And(left, right) => write!(f, "({left} AND {right})"),
            PredicateNode::Or(left, right) => write!(f, "({left} OR {right})"),
            PredicateNode::Not(inner) => write!(f, "NOT {inner}"),
            PredicateNode::Compare {
                property,
                op,
                value,
            } => write!(f, "{property} {op:?} {value}"),
            PredicateNode::IsNull { property } => write!(f, "{property} IS NULL"),
            PredicateNode::Like { property, pattern } => {
                write!(f, "{property} LIKE {:?}({})", pattern.mode, pattern.literal)
            }
            PredicateNode::In { property, values } => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{property} IN ({})", items.join(", "))
            }
        }
    }
}

/// A compiled filter for entities of type `T`.
///
/// Immutable and cheap to clone; clones share the same tree.
pub struct CompiledPredicate<T: ?Sized> {
    root: Arc<PredicateNode>,
    _entity: PhantomData<fn(&T) -> bool>,
}

impl<T: ?Sized> CompiledPredicate<T> {
    pub fn new(root: PredicateNode) -> Self {
        Self::from_shared(Arc::new(root))
    }

    pub(crate) fn from_shared(root: Arc<PredicateNode>) -> Self {
        Self {
            root,
            _entity: PhantomData,
        }
    }

    pub fn root(&self) -> &PredicateNode {
        &self.root
    }
}

impl<T: Entity + ?Sized> CompiledPredicate<T> {
    pub fn evaluate(&self, entity: &T) -> bool {
        self.root.evaluate(entity)
    }

    /// Keeps the items the predicate accepts, in order.
    pub fn filter<'a, I>(&self, items: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items.into_iter().filter(|item| self.evaluate(item)).collect()
    }
}

impl<T: ?Sized> Clone for CompiledPredicate<T> {
    fn clone(&self) -> Self {
        Self::from_shared(Arc::clone(&self.root))
    }
}

impl<T: ?Sized> PartialEq for CompiledPredicate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<T: ?Sized> fmt::Debug for CompiledPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPredicate")
            .field("root", &self.root)
            .finish()
    }
}

impl<T: ?Sized> fmt::Display for CompiledPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
