//! Tests for building the filter tree from parsed text

use rsql_syntax::{
    SyntaxError,
    ast::{Comparator, FilterNode, RawLiteral},
    parse,
};

fn children(node: &FilterNode) -> &[FilterNode] {
    match node {
        FilterNode::Or { children } | FilterNode::And { children } => children,
        FilterNode::Comparison(_) => panic!("expected a logical node, got {node:?}"),
    }
}

#[test]
fn test_root_is_or_of_ands() {
    let node = parse("a==1;b==2,c==3").unwrap();

    assert!(matches!(node, FilterNode::Or { .. }));
    let groups = children(&node);
    assert_eq!(groups.len(), 2);
    assert!(matches!(groups[0], FilterNode::And { .. }));
    assert_eq!(children(&groups[0]).len(), 2);
    assert_eq!(children(&groups[1]).len(), 1);
}

#[test]
fn test_word_combinators_match_symbols() {
    let symbols = parse("a==1;b==2,c==3").unwrap();
    let words = parse("a==1 and b==2 or c==3").unwrap();

    let strip = |node: &FilterNode| -> Vec<(String, Comparator, Vec<RawLiteral>)> {
        node.comparisons()
            .into_iter()
            .map(|c| (c.selector.clone(), c.comparator, c.arguments.clone()))
            .collect()
    };
    assert_eq!(strip(&symbols), strip(&words));
    assert_eq!(children(&words).len(), 2);
}

#[test]
fn test_word_combinators_before_groups() {
    let spaced = parse("age==1 and (name==x)").unwrap();
    for input in ["age==1 and(name==x)", "(age==1)and(name==x)", "(age==1)AND(name==x)"] {
        let node = parse(input).unwrap();
        let comparisons = node.comparisons();
        assert_eq!(comparisons.len(), 2, "{input}");
        assert_eq!(comparisons[0].selector, "age");
        assert_eq!(comparisons[1].selector, "name");
        assert_eq!(children(&node).len(), 1, "{input}");
        assert_eq!(children(&children(&node)[0]).len(), 2, "{input}");
    }
    assert_eq!(children(&children(&spaced)[0]).len(), 2);

    let either = parse("(a==1)or(b==2)").unwrap();
    assert_eq!(children(&either).len(), 2);
}

#[test]
fn test_group_becomes_nested_or() {
    let node = parse("(a==1,b==2);c==3").unwrap();

    let and = &children(&node)[0];
    let members = children(and);
    assert_eq!(members.len(), 2);
    assert!(matches!(members[0], FilterNode::Or { .. }));
    assert_eq!(children(&members[0]).len(), 2);
    assert!(matches!(members[1], FilterNode::Comparison(_)));
}

#[test]
fn test_comparison_fields() {
    let node = parse("name=lk=*oh*").unwrap();
    let comparisons = node.comparisons();

    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0].selector, "name");
    assert_eq!(comparisons[0].comparator, Comparator::Like);
    assert_eq!(
        comparisons[0].arguments,
        vec![RawLiteral::Unquoted("*oh*".to_string())]
    );
}

#[test]
fn test_nullary_comparators_have_no_arguments() {
    let node = parse("name=isnull= and isActive=istrue=").unwrap();
    let comparisons = node.comparisons();

    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0].comparator, Comparator::IsNull);
    assert!(comparisons[0].arguments.is_empty());
    assert_eq!(comparisons[1].comparator, Comparator::IsTrue);
}

#[test]
fn test_missing_argument_is_kept_empty() {
    let node = parse("age==").unwrap();
    assert_eq!(node.comparisons()[0].arguments, Vec::<RawLiteral>::new());
}

#[test]
fn test_argument_list() {
    let node = parse("age=in=(1, 2 ,3)").unwrap();
    assert_eq!(
        node.comparisons()[0].arguments,
        vec![
            RawLiteral::Number("1".to_string()),
            RawLiteral::Number("2".to_string()),
            RawLiteral::Number("3".to_string()),
        ]
    );
}

#[test]
fn test_quoted_literal_keeps_quotes() {
    let node = parse("name=='John Smith'").unwrap();
    assert_eq!(
        node.comparisons()[0].arguments,
        vec![RawLiteral::QuotedString("'John Smith'".to_string())]
    );
}

#[test]
fn test_unknown_comparator() {
    let err = parse("name==x;age=older=3").unwrap_err();
    assert!(
        matches!(err, SyntaxError::UnknownComparator { ref token, .. } if token == "=older="),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_malformed_filter_reports_position() {
    let err = parse("a==1;").unwrap_err();
    match &err {
        SyntaxError::Parse { line, column, .. } => {
            assert_eq!(*line, 1);
            assert!(*column >= 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.format_error().contains("a==1;"));
    assert!(err.format_error().contains("    ^"));
}

#[test]
fn test_ast_serializes_to_json() {
    let node = parse("age>=18").unwrap();
    let json = serde_json::to_value(&node).unwrap();

    assert_eq!(json["kind"], "or");
    assert_eq!(json["children"][0]["kind"], "and");
    let comparison = &json["children"][0]["children"][0];
    assert_eq!(comparison["kind"], "comparison");
    assert_eq!(comparison["selector"], "age");
    assert_eq!(comparison["comparator"], "ge");
    assert_eq!(comparison["arguments"][0]["kind"], "number");
    assert_eq!(comparison["arguments"][0]["text"], "18");
}
