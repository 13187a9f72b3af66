use crate::{
    ast::{Comparator, Comparison, FilterNode, RawLiteral, Span},
    error::SyntaxError,
    parser::{Rule, RsqlParser},
};
use pest::{Parser, iterators::Pair};
use tracing::trace;

pub type BuildResult<T> = Result<T, SyntaxError>;

/// Parse filter text into a [`FilterNode`] tree.
///
/// The root is always an `Or`. Empty or blank text yields the open filter.
pub fn parse(input: &str) -> BuildResult<FilterNode> {
    let mut pairs =
        RsqlParser::parse(Rule::filter, input).map_err(SyntaxError::from_pest_error)?;

    let Some(filter) = pairs.next() else {
        return Ok(FilterNode::open());
    };

    let root = match filter.into_inner().find(|p| p.as_rule() == Rule::or_expr) {
        Some(or_expr) => build_or(or_expr)?,
        None => FilterNode::open(),
    };

    trace!(
        "Parsed filter with {} comparison(s): {}",
        root.comparison_count(),
        input
    );
    Ok(root)
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, col) = pair.line_col();
    let span_pest = pair.as_span();
    Span::new(span_pest.start(), span_pest.end(), line, col)
}

fn build_or(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let mut children = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::and_expr => children.push(build_and(inner)?),
            Rule::or_op => {}
            _ => {}
        }
    }
    Ok(FilterNode::Or { children })
}

fn build_and(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let mut children = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::comparison => children.push(build_comparison(inner)?),
            Rule::group => children.push(build_group(inner)?),
            Rule::and_op => {}
            _ => {}
        }
    }
    Ok(FilterNode::And { children })
}

fn build_group(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    match pair.into_inner().find(|p| p.as_rule() == Rule::or_expr) {
        Some(or_expr) => build_or(or_expr),
        None => Ok(FilterNode::open()),
    }
}

fn build_comparison(pair: Pair<Rule>) -> BuildResult<FilterNode> {
    let span = pair_to_span(&pair);
    let mut selector = String::new();
    let mut comparator = None;
    let mut arguments = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::selector => selector = inner.as_str().to_string(),
            Rule::comparator => comparator = Some(build_comparator(&inner)?),
            Rule::arguments => {
                for arg in inner.into_inner() {
                    if let Some(literal) = build_literal(&arg) {
                        arguments.push(literal);
                    }
                }
            }
            _ => {}
        }
    }

    // The grammar guarantees a comparator token on every comparison.
    let comparator = comparator.ok_or_else(|| SyntaxError::Parse {
        message: "expected comparator".to_string(),
        line: span.line,
        column: span.column,
        source_snippet: String::new(),
    })?;

    Ok(FilterNode::Comparison(Comparison {
        selector,
        comparator,
        arguments,
        span,
    }))
}

fn build_comparator(pair: &Pair<Rule>) -> BuildResult<Comparator> {
    pair.as_str()
        .parse::<Comparator>()
        .map_err(|unknown| SyntaxError::UnknownComparator {
            token: unknown.0,
            span: pair_to_span(pair),
        })
}

fn build_literal(pair: &Pair<Rule>) -> Option<RawLiteral> {
    let text = pair.as_str().to_string();
    match pair.as_rule() {
        Rule::quoted => Some(RawLiteral::QuotedString(text)),
        Rule::number => Some(RawLiteral::Number(text)),
        Rule::date => Some(RawLiteral::Date(text)),
        Rule::unquoted => Some(RawLiteral::Unquoted(text)),
        _ => None,
    }
}
