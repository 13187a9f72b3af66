//! End-to-end compilation tests against a statically typed entity

use chrono::{NaiveDate, NaiveDateTime};
use filter_engine::{
    CompileError, CompiledPredicate, FilterCompiler, NamingConvention, PredicateNode,
};
use model::{
    core::{scalar_kind::ScalarKind, value::Value},
    records::record::Record,
    schema::{Entity, PropertyDescriptor, SchemaRegistry, TypedEntity},
};
use rsql_syntax::ast::{Comparator, FilterNode};
use std::{sync::Arc, thread};

#[derive(Debug, Clone, Default)]
struct User {
    name: Option<String>,
    user_name: String,
    age: i32,
    rank: i16,
    score: f64,
    is_active: Option<bool>,
    created_at: Option<NaiveDateTime>,
}

impl Entity for User {
    fn property_value(&self, name: &str) -> Value {
        match name {
            "Name" => self.name.clone().map(Value::String).unwrap_or(Value::Null),
            "UserName" => Value::String(self.user_name.clone()),
            "Age" => Value::Int32(self.age),
            "Rank" => Value::Int16(self.rank),
            "Score" => Value::Float64(self.score),
            "IsActive" => self.is_active.map(Value::Boolean).unwrap_or(Value::Null),
            "CreatedAt" => self.created_at.map(Value::DateTime).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

impl TypedEntity for User {
    const NAME: &'static str = "User";

    fn properties() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new("Name", ScalarKind::String),
            PropertyDescriptor::new("UserName", ScalarKind::String),
            PropertyDescriptor::new("Age", ScalarKind::Int32),
            PropertyDescriptor::new("Rank", ScalarKind::Int16),
            PropertyDescriptor::new("Score", ScalarKind::Float64),
            PropertyDescriptor::nullable("IsActive", ScalarKind::Bool),
            PropertyDescriptor::nullable("CreatedAt", ScalarKind::DateTime),
        ]
    }
}

fn compiler() -> FilterCompiler {
    let registry = SchemaRegistry::new().with_type::<User>().unwrap();
    FilterCompiler::new(registry)
}

fn compile(filter: &str) -> Result<CompiledPredicate<User>, CompileError> {
    compiler().compile_for::<User>(filter, NamingConvention::CamelCase)
}

fn named(name: &str) -> User {
    User {
        name: Some(name.to_string()),
        ..User::default()
    }
}

fn aged(age: i32) -> User {
    User {
        age,
        ..User::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn test_equality() {
    let predicate = compile("age==18").unwrap();

    assert!(predicate.evaluate(&aged(18)));
    assert!(!predicate.evaluate(&aged(17)));
}

#[test]
fn test_like_contains() {
    let predicate = compile("name=lk=*oh*").unwrap();

    assert!(predicate.evaluate(&named("John")));
    assert!(!predicate.evaluate(&named("Amy")));
}

#[test]
fn test_like_escaped_wildcard() {
    let predicate = compile(r"name=lk=ab\*cd").unwrap();

    assert!(predicate.evaluate(&named("ab*cd")));
    assert!(!predicate.evaluate(&named("abXcd")));
    assert!(!predicate.evaluate(&named("abcd")));
}

#[test]
fn test_like_quoted_pattern() {
    let predicate = compile("name=like='*son'").unwrap();

    assert!(predicate.evaluate(&named("Jackson")));
    assert!(!predicate.evaluate(&named("Sonny")));
}

#[test]
fn test_arity() {
    assert!(matches!(
        compile("age=="),
        Err(CompileError::NotEnoughArguments { ref field, comparator: Comparator::Eq, .. }) if field == "age"
    ));
    assert!(matches!(
        compile("age==(1,2)"),
        Err(CompileError::TooManyArguments { count: 2, .. })
    ));
    assert!(matches!(
        compile("age=in=()"),
        Err(CompileError::Parse(_))
    ));
    assert!(matches!(
        compile("age=in='x'"),
        Err(CompileError::NotEnoughArguments { .. })
    ));
}

#[test]
fn test_type_legality() {
    let illegal = [
        "isActive=gt=true",
        "name=gt=abc",
        "age=lk=1*",
        "age=isnull=",
        "name=istrue=",
    ];

    for filter in illegal {
        assert!(
            matches!(compile(filter), Err(CompileError::InvalidComparatorForType { .. })),
            "expected type error for {filter}"
        );
    }
}

#[test]
fn test_error_carries_position() {
    let err = compile("age==1;isActive=gt=true").unwrap_err();
    match err {
        CompileError::InvalidComparatorForType {
            field,
            comparator,
            declared_type,
            span,
        } => {
            assert_eq!(field, "isActive");
            assert_eq!(comparator, Comparator::Gt);
            assert_eq!(declared_type, ScalarKind::Bool);
            assert_eq!(span.column, 8);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_ordering() {
    let younger = compile("age<18").unwrap();
    assert!(younger.evaluate(&aged(17)));
    assert!(!younger.evaluate(&aged(18)));

    let at_least = compile("score=ge=2").unwrap();
    let scored = User {
        score: 2.0,
        ..User::default()
    };
    assert!(at_least.evaluate(&scored));

    let recent = compile("createdAt=gt=2020-06-01").unwrap();
    let created = |d| User {
        created_at: Some(d),
        ..User::default()
    };
    assert!(recent.evaluate(&created(date(2021, 1, 1))));
    assert!(!recent.evaluate(&created(date(2019, 1, 1))));
    assert!(!recent.evaluate(&User::default()));
}

#[test]
fn test_in_out_duality() {
    let within = compile("age=in=(1,2,3)").unwrap();
    let outside = compile("age=out=(1,2,3)").unwrap();

    for age in 0..6 {
        let user = aged(age);
        assert_eq!(within.evaluate(&user), (1..=3).contains(&age));
        assert_eq!(outside.evaluate(&user), !within.evaluate(&user));
    }

    let names_out = compile("name=out=('John')").unwrap();
    assert!(names_out.evaluate(&User::default()));
}

#[test]
fn test_boolean_and_null_tests() {
    let active = compile("isActive=istrue=").unwrap();
    let inactive = compile("isActive=isfalse=").unwrap();
    let unknown = compile("isActive=isnull=").unwrap();
    let known = compile("isActive=isnotnull=").unwrap();

    let on = User {
        is_active: Some(true),
        ..User::default()
    };
    let unset = User::default();

    assert!(active.evaluate(&on));
    assert!(!inactive.evaluate(&on));
    assert!(!active.evaluate(&unset));
    assert!(!inactive.evaluate(&unset));
    assert!(unknown.evaluate(&unset));
    assert!(known.evaluate(&on));
}

#[test]
fn test_null_string_never_equals() {
    assert!(!compile("name==John").unwrap().evaluate(&User::default()));
    assert!(compile("name!=John").unwrap().evaluate(&User::default()));
    assert!(compile("name=isnull=").unwrap().evaluate(&User::default()));
}

#[test]
fn test_bool_equality_has_no_coercible_argument() {
    assert!(matches!(
        compile("isActive==true"),
        Err(CompileError::NotEnoughArguments { .. })
    ));
}

#[test]
fn test_invalid_value() {
    assert!(matches!(
        compile("rank==70000"),
        Err(CompileError::InvalidValue { ref literal, declared_type: ScalarKind::Int16, .. }) if literal == "70000"
    ));
    assert!(matches!(
        compile("age==1.5"),
        Err(CompileError::InvalidValue { .. })
    ));
}

#[test]
fn test_combinators() {
    let predicate = compile("(age==1,age==2);name==John or age>=60").unwrap();

    let john = |age| User {
        age,
        name: Some("John".to_string()),
        ..User::default()
    };
    assert!(predicate.evaluate(&john(1)));
    assert!(!predicate.evaluate(&john(3)));
    assert!(!predicate.evaluate(&aged(2)));
    assert!(predicate.evaluate(&aged(60)));
}

#[test]
fn test_open_filter() {
    let predicate = compile("").unwrap();
    assert_eq!(*predicate.root(), PredicateNode::Constant(true));
    assert!(predicate.evaluate(&User::default()));

    let empty_and = FilterNode::Or {
        children: vec![FilterNode::And { children: vec![] }],
    };
    let predicate = compiler()
        .compile_node::<User>("User", &empty_and, NamingConvention::AsIs)
        .unwrap();
    assert!(predicate.evaluate(&aged(99)));
}

#[test]
fn test_naming_conventions() {
    let compiler = compiler();

    let snake = compiler
        .compile_for::<User>("user_name==jdoe", NamingConvention::SnakeCase)
        .unwrap();
    let jdoe = User {
        user_name: "jdoe".to_string(),
        ..User::default()
    };
    assert!(snake.evaluate(&jdoe));

    let as_is = compiler.compile_for::<User>("user_name==jdoe", NamingConvention::AsIs);
    assert!(matches!(
        as_is,
        Err(CompileError::PropertyNotFound { ref field, .. }) if field == "user_name"
    ));
}

#[test]
fn test_comparator_and_parse_errors() {
    assert!(matches!(
        compile("age=foo=1"),
        Err(CompileError::UnknownComparator { ref token, .. }) if token == "=foo="
    ));
    assert!(matches!(compile("age==1;;"), Err(CompileError::Parse(_))));
    assert!(matches!(
        compiler().compile::<User>("Order", "age==1", NamingConvention::AsIs),
        Err(CompileError::UnknownEntity(_))
    ));
}

#[test]
fn test_deterministic_compilation() {
    let filter = r"name=lk=*a\*b*;age=in=(1,2),createdAt=le=2021-01-01T10:00:00+02:00";

    let first = compiler()
        .compile_for::<User>(filter, NamingConvention::CamelCase)
        .unwrap();
    let second = compiler()
        .compile_for::<User>(filter, NamingConvention::CamelCase)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_predicate_cache_hits() {
    let compiler = compiler();

    let first = compiler
        .compile_for::<User>("age==18", NamingConvention::CamelCase)
        .unwrap();
    let second = compiler
        .compile_for::<User>("age==18", NamingConvention::CamelCase)
        .unwrap();
    assert_eq!(first, second);

    let stats = compiler.cache_stats().unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
}

#[test]
fn test_failed_compilation_is_not_cached() {
    let compiler = compiler();

    assert!(compiler.compile_for::<User>("age==", NamingConvention::CamelCase).is_err());
    assert_eq!(compiler.cache_stats().unwrap().entries, 0);
}

#[test]
fn test_default_convention() {
    let compiler = compiler();
    assert!(compiler.compile_default::<User>("User", "Age==1").is_ok());
    assert!(compiler.compile_default::<User>("User", "age==1").is_err());
}

#[test]
fn test_shared_across_threads() {
    let compiler = Arc::new(compiler());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let compiler = Arc::clone(&compiler);
            thread::spawn(move || {
                let predicate = compiler
                    .compile_for::<User>("age=gt=10", NamingConvention::CamelCase)
                    .unwrap();
                predicate.evaluate(&aged(10 + i))
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, true, true, true]);
}

#[test]
fn test_records_from_json_schema() {
    let registry = SchemaRegistry::from_json_str(
        r#"{"entities": [{"name": "Track", "properties": [
            {"name": "Title", "type": "string"},
            {"name": "Milliseconds", "type": "int"},
            {"name": "UnitPrice", "type": "decimal"}
        ]}]}"#,
    )
    .unwrap();
    let schema = registry.get("Track").unwrap();
    let compiler = FilterCompiler::new(registry);

    let tracks: Vec<Record> = [
        serde_json::json!({"Title": "Blackened", "Milliseconds": 403000, "UnitPrice": 0.99}),
        serde_json::json!({"Title": "One", "Milliseconds": 446000, "UnitPrice": 1.99}),
    ]
    .iter()
    .map(|json| Record::from_json(&schema, json).unwrap())
    .collect();

    let predicate = compiler
        .compile::<Record>("Track", "milliseconds=gt=420000;unitPrice=lt=2", NamingConvention::CamelCase)
        .unwrap();
    let kept = predicate.filter(tracks.iter());

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].get_value("Title"), Value::String("One".to_string()));
}
