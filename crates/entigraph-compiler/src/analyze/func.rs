//! Shape analysis of the parsed function: the spec's supported subset is
//! "plain function, one parameter, no generator" — most of this is enforced
//! by the grammar already, but we still compute it explicitly so
//! `lint::check_shape` has something uniform to test against.

use crate::ast::FunctionDef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncShape {
    pub name: String,
    pub arg_count: usize,
    pub is_empty: bool,
    /// The surface grammar has no `yield`, so a parsed function is never a
    /// generator. Kept as a field (rather than dropped) so lint's shape
    /// check reads the same regardless of how that could change later.
    pub is_generator: bool,
    pub has_docstring: bool,
}

pub fn shape(func: &FunctionDef) -> FuncShape {
    let is_empty = func
        .body
        .iter()
        .all(|s| matches!(s, crate::ast::Stmt::Pass { .. } | crate::ast::Stmt::Docstring { .. }));
    let has_docstring = func
        .body
        .first()
        .is_some_and(|s| matches!(s, crate::ast::Stmt::Docstring { .. }));
    FuncShape {
        name: func.name.clone(),
        arg_count: 1,
        is_empty,
        is_generator: false,
        has_docstring,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn empty_function_is_reported_empty() {
        let f = parse("def update(self) { pass; }").unwrap();
        assert!(shape(&f).is_empty);
    }

    #[test]
    fn function_with_a_statement_is_not_empty() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                p.speed.value = 1.0;
            }"#,
        )
        .unwrap();
        assert!(!shape(&f).is_empty);
    }

    #[test]
    fn docstring_is_detected() {
        let f = parse(r#"def update(self) { "does a thing"; pass; }"#).unwrap();
        assert!(shape(&f).has_docstring);
    }
}
