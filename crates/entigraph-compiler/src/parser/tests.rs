use super::parse;
use crate::ast::{BinOp, BuiltinFn, Expr, Stmt, Target};

#[test]
fn parses_empty_function() {
    let f = parse("def update(self) { pass; }").unwrap();
    assert_eq!(f.name, "update");
    assert_eq!(f.param, "self");
    assert_eq!(f.body.len(), 1);
    assert!(matches!(f.body[0], Stmt::Pass { .. }));
}

#[test]
fn parses_docstring_before_body() {
    let f = parse(r#"def update(self) { "advances position"; pass; }"#).unwrap();
    assert_eq!(f.body.len(), 2);
    match &f.body[0] {
        Stmt::Docstring { text, .. } => assert_eq!(text, "advances position"),
        other => panic!("expected docstring, got {other:?}"),
    }
}

#[test]
fn parses_entity_binding_with_components() {
    let f = parse(r#"def update(self) { entity p("position", "velocity"); }"#).unwrap();
    match &f.body[0] {
        Stmt::BindEntity { name, components, .. } => {
            assert_eq!(name, "p");
            assert_eq!(components, &vec!["position".to_string(), "velocity".to_string()]);
        }
        other => panic!("expected BindEntity, got {other:?}"),
    }
}

#[test]
fn parses_attribute_assignment_and_augmented_assignment() {
    let f = parse(
        r#"def update(self) {
            entity p("position", "velocity");
            p.position.x += p.velocity.dx;
        }"#,
    )
    .unwrap();
    match &f.body[1] {
        Stmt::AugAssign { target, op, value, .. } => {
            assert_eq!(
                target,
                &Target::Attribute {
                    entity: "p".to_string(),
                    component: "position".to_string(),
                    attribute: "x".to_string(),
                }
            );
            assert_eq!(*op, BinOp::Add);
            assert!(matches!(value, Expr::Attribute { .. }));
        }
        other => panic!("expected AugAssign, got {other:?}"),
    }
}

#[test]
fn parses_if_elif_else_as_nested_if() {
    let f = parse(
        r#"def update(self) {
            entity p("speed");
            if p.speed.value > 10.0 {
                p.speed.value = 10.0;
            } elif p.speed.value < 0.0 {
                p.speed.value = 0.0;
            } else {
                pass;
            }
        }"#,
    )
    .unwrap();
    match &f.body[1] {
        Stmt::If { then_body, else_body, .. } => {
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.len(), 1);
            match &else_body[0] {
                Stmt::If { else_body: inner_else, .. } => {
                    assert_eq!(inner_else.len(), 1);
                    assert!(matches!(inner_else[0], Stmt::Pass { .. }));
                }
                other => panic!("expected nested If from elif, got {other:?}"),
            }
        }
        other => panic!("expected If, got {other:?}"),
    }
}

#[test]
fn parses_ternary_expression() {
    let f = parse(
        r#"def update(self) {
            entity p("speed");
            p.speed.value = 1.0 if p.speed.value > 0.0 else -1.0;
        }"#,
    )
    .unwrap();
    match &f.body[1] {
        Stmt::Assign { value: Expr::Ternary { .. }, .. } => {}
        other => panic!("expected Assign with Ternary value, got {other:?}"),
    }
}

#[test]
fn parses_builtin_calls_and_checks_arity() {
    let f = parse(
        r#"def update(self) {
            entity p("speed");
            p.speed.value = min(p.speed.value, 10.0);
        }"#,
    )
    .unwrap();
    match &f.body[1] {
        Stmt::Assign { value: Expr::Call { func, args, .. }, .. } => {
            assert_eq!(*func, BuiltinFn::Min);
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected Assign with Call value, got {other:?}"),
    }
}

#[test]
fn rejects_builtin_call_with_wrong_arity() {
    let err = parse(
        r#"def update(self) {
            entity p("speed");
            p.speed.value = abs(1.0, 2.0);
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, crate::CompileError::UnsupportedInput { .. }));
}

#[test]
fn rejects_trailing_input_after_function_body() {
    let err = parse("def update(self) { pass; } def other(self) { pass; }").unwrap_err();
    assert!(matches!(err, crate::CompileError::UnsupportedInput { .. }));
}

#[test]
fn rejects_wrong_number_of_parameters() {
    let err = parse("def update() { pass; }").unwrap_err();
    assert!(matches!(err, crate::CompileError::UnsupportedInput { .. }));
}
