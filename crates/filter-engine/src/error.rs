use model::core::scalar_kind::ScalarKind;
use rsql_syntax::{
    SyntaxError,
    ast::{Comparator, Span},
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error(transparent)]
    Parse(SyntaxError),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Property '{field}' not found on '{entity}' (line {}, column {})", span.line, span.column)]
    PropertyNotFound {
        entity: String,
        field: String,
        span: Span,
    },

    #[error("Not enough arguments for '{field}{comparator}' (line {}, column {})", span.line, span.column)]
    NotEnoughArguments {
        field: String,
        comparator: Comparator,
        span: Span,
    },

    #[error("Too many arguments ({count}) for '{field}{comparator}' (line {}, column {})", span.line, span.column)]
    TooManyArguments {
        field: String,
        comparator: Comparator,
        count: usize,
        span: Span,
    },

    #[error("Comparator '{comparator}' cannot be applied to '{field}' of type {declared_type} (line {}, column {})", span.line, span.column)]
    InvalidComparatorForType {
        field: String,
        comparator: Comparator,
        declared_type: ScalarKind,
        span: Span,
    },

    #[error("Unknown comparator '{token}' (line {}, column {})", span.line, span.column)]
    UnknownComparator { token: String, span: Span },

    #[error("Invalid value '{literal}' for '{field}{comparator}', expected {declared_type} (line {}, column {})", span.line, span.column)]
    InvalidValue {
        field: String,
        comparator: Comparator,
        literal: String,
        declared_type: ScalarKind,
        span: Span,
    },
}

impl From<SyntaxError> for CompileError {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::UnknownComparator { token, span } => {
                CompileError::UnknownComparator { token, span }
            }
            other => CompileError::Parse(other),
        }
    }
}

impl CompileError {
    /// Source position of the offending node, when the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Parse(_) | CompileError::UnknownEntity(_) => None,
            CompileError::PropertyNotFound { span, .. }
            | CompileError::NotEnoughArguments { span, .. }
            | CompileError::TooManyArguments { span, .. }
            | CompileError::InvalidComparatorForType { span, .. }
            | CompileError::UnknownComparator { span, .. }
            | CompileError::InvalidValue { span, .. } => Some(*span),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
