//! Enforces the supported subset once the shape/activity analyses have run.

use super::activity::{self, ActivityTable};
use super::func::FuncShape;
use crate::ast::{Expr, Stmt};
use crate::{CompileError, Result};

pub fn check_shape(shape: &FuncShape) -> Result<()> {
    if shape.arg_count != 1 {
        return Err(CompileError::UnsupportedInput {
            message: format!(
                "'{}' must take exactly one parameter, found {}",
                shape.name, shape.arg_count
            ),
        });
    }
    if shape.is_generator {
        return Err(CompileError::UnsupportedInput {
            message: format!("'{}' must not be a generator", shape.name),
        });
    }
    Ok(())
}

/// Walks `if`/`else` pairs looking for a local written in exactly one
/// branch and then read later, with nothing upstream defining a default.
/// The spec treats this as an error rather than silently reading stale
/// state, so we raise `UnsupportedControlFlow` instead of guessing.
pub fn check_control_flow(body: &[Stmt], activity: &ActivityTable) -> Result<()> {
    check_block(body, activity)
}

fn check_block(stmts: &[Stmt], activity: &ActivityTable) -> Result<()> {
    for (i, stmt) in stmts.iter().enumerate() {
        if let Stmt::If { then_body, else_body, .. } = stmt {
            check_block(then_body, activity)?;
            check_block(else_body, activity)?;

            let then_out = activity::block_writes(then_body);
            let else_out = activity::block_writes(else_body);
            let asymmetric = then_out.symmetric_difference(&else_out);

            for sym in asymmetric.filter(|s| !s.contains('.')) {
                if is_read_after(&stmts[i + 1..], sym) {
                    return Err(CompileError::UnsupportedControlFlow {
                        message: format!(
                            "'{sym}' is written in only one branch and read later with no default"
                        ),
                        span: stmt.span(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn is_read_after(stmts: &[Stmt], sym: &str) -> bool {
    for stmt in stmts {
        match stmt {
            Stmt::Assign { target, value, .. } | Stmt::AugAssign { target, value, .. } => {
                if expr_reads(value, sym) {
                    return true;
                }
                if matches!(target, crate::ast::Target::Name(n) if n == sym) {
                    return false;
                }
            }
            Stmt::If { cond, then_body, else_body, .. } => {
                if expr_reads(cond, sym) {
                    return true;
                }
                if is_read_after(then_body, sym) || is_read_after(else_body, sym) {
                    return true;
                }
            }
            Stmt::BindEntity { .. } | Stmt::Docstring { .. } | Stmt::Pass { .. } => {}
        }
    }
    false
}

fn expr_reads(expr: &Expr, sym: &str) -> bool {
    if let Expr::Name { name, .. } = expr {
        return name == sym;
    }
    expr.children().iter().any(|c| expr_reads(c, sym))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::activity;
    use crate::parser::parse;

    #[test]
    fn asymmetric_write_read_later_is_rejected() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                if p.speed.value > 0.0 {
                    x = 1.0;
                }
                p.speed.value = x;
            }"#,
        )
        .unwrap();
        let table = activity::analyze(&f.body);
        let err = check_control_flow(&f.body, &table).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedControlFlow { .. }));
    }

    #[test]
    fn symmetric_write_in_both_branches_is_accepted() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                if p.speed.value > 0.0 {
                    x = 1.0;
                } else {
                    x = 2.0;
                }
                p.speed.value = x;
            }"#,
        )
        .unwrap();
        let table = activity::analyze(&f.body);
        assert!(check_control_flow(&f.body, &table).is_ok());
    }

    #[test]
    fn asymmetric_write_never_read_is_accepted() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                if p.speed.value > 0.0 {
                    x = 1.0;
                }
                pass;
            }"#,
        )
        .unwrap();
        let table = activity::analyze(&f.body);
        assert!(check_control_flow(&f.body, &table).is_ok());
    }
}
