// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

//
// Test API of the context / symbol table
//

use oq3_ast::Span;
use oq3_classical::{Raw, UnsignedInt};
use oq3_translator::{Context, ErrorKind, Value};

#[test]
fn test_lookup_of_undeclared_name_fails() {
    let context = Context::new();
    let error = context.lookup("x", None).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorKind::UndefinedSymbol("x".to_string())
    );
}

#[test]
fn test_declared_but_unbound_lookup_fails_with_definition_site() {
    let mut context = Context::new();
    let definition = Span::new(1, 1, 1, 6);
    context.declare("x", Some(definition));
    let use_site = Span::new(3, 5, 3, 6);
    let error = context.lookup("x", Some(&use_site)).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorKind::UninitializedSymbol {
            name: "x".to_string(),
            declared_at: Some(definition),
        }
    );
    // The failure carries the lookup site; the kind carries the definition.
    assert_eq!(error.span(), Some(&use_site));
}

#[test]
fn test_bind_then_lookup_returns_the_value() {
    let mut context = Context::new();
    context.bind("x", Value::Raw(Raw::Int(3)), None);
    match context.lookup("x", None).unwrap() {
        Value::Raw(Raw::Int(3)) => {}
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn test_rebind_keeps_definition_site() {
    let mut context = Context::new();
    let definition = Span::new(2, 1, 2, 10);
    context.bind("x", Value::Raw(Raw::Int(0)), Some(definition));
    context
        .rebind("x", Value::Raw(Raw::Int(7)), None)
        .unwrap();
    assert_eq!(context.lookup_span("x"), Some(&definition));
    match context.lookup("x", None).unwrap() {
        Value::Raw(Raw::Int(7)) => {}
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn test_rebind_of_unknown_name_fails() {
    let mut context = Context::new();
    let error = context
        .rebind("nope", Value::Raw(Raw::Int(1)), None)
        .unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::UndefinedSymbol(..)));
}

#[test]
fn test_derived_scope_sees_outer_bindings_but_never_leaks() {
    let mut outer = Context::new();
    outer.bind(
        "x",
        Value::Classical(UnsignedInt::new(4, 5).unwrap().to_value()),
        None,
    );

    let mut inner = outer.derived_scope();
    assert!(inner.lookup("x", None).is_ok());

    inner.bind("y", Value::Raw(Raw::Int(1)), None);
    inner
        .rebind("x", Value::Raw(Raw::Int(9)), None)
        .unwrap();

    // Inner declaration and inner mutation are both invisible outside.
    assert!(!outer.is_declared("y"));
    match outer.lookup("x", None).unwrap() {
        Value::Classical(value) => assert_eq!(value.encoding(), 5),
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn test_builtin_constants_are_shared_per_translation() {
    let context = Context::new();
    let scope = context.derived_scope();
    assert_eq!(scope.constant("tau"), Some(std::f64::consts::TAU));
    assert_eq!(scope.constant("𝜏"), Some(std::f64::consts::TAU));
    assert_eq!(scope.constant("euler"), Some(std::f64::consts::E));
    assert_eq!(scope.constant_names().len(), 6);
}
