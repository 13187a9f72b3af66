use crate::ast::{comparator::Comparator, literal::RawLiteral, span::Span};
use serde::Serialize;

/// Parsed filter.
///
/// The root is always an `Or`. `Or` children are `And` nodes; `And`
/// children are comparisons or parenthesised groups (nested `Or`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterNode {
    Or { children: Vec<FilterNode> },
    And { children: Vec<FilterNode> },
    Comparison(Comparison),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub selector: String,
    pub comparator: Comparator,
    pub arguments: Vec<RawLiteral>,
    pub span: Span,
}

impl FilterNode {
    /// The filter that matches everything.
    pub fn open() -> Self {
        FilterNode::Or {
            children: Vec::new(),
        }
    }

    /// Number of comparisons in the tree.
    pub fn comparison_count(&self) -> usize {
        match self {
            FilterNode::Or { children } | FilterNode::And { children } => {
                children.iter().map(FilterNode::comparison_count).sum()
            }
            FilterNode::Comparison(_) => 1,
        }
    }

    /// Comparisons in source order.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            FilterNode::Or { children } | FilterNode::And { children } => {
                for child in children {
                    child.collect_comparisons(out);
                }
            }
            FilterNode::Comparison(comparison) => out.push(comparison),
        }
    }
}
