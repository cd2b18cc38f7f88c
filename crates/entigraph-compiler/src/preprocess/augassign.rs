//! Rewrites `target OP= value` into `target = target OP value`.

use crate::ast::{Expr, Stmt, Target};

pub(super) fn desugar_block(stmts: Vec<Stmt>) -> Vec<Stmt> {
    stmts.into_iter().map(desugar_stmt).collect()
}

fn desugar_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::AugAssign { id, target, op, value, span } => {
            let lhs = target_as_expr(&target, value.span());
            Stmt::Assign {
                id,
                target,
                value: Expr::Binary {
                    id,
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(value),
                    span,
                },
                span,
            }
        }
        Stmt::If { id, cond, then_body, else_body, span } => Stmt::If {
            id,
            cond,
            then_body: desugar_block(then_body),
            else_body: desugar_block(else_body),
            span,
        },
        other => other,
    }
}

/// Re-reads `target` as an expression so `target OP value` can be built.
/// Reuses the target's own `id`: the read and the write of an `AugAssign`
/// refer to the same source location, so giving the synthesized read a
/// fresh id would only create a phantom node with no source span of its own.
fn target_as_expr(target: &Target, span: crate::ast::Span) -> Expr {
    match target {
        Target::Name(name) => Expr::Name {
            id: crate::ast::NodeId(u32::MAX),
            name: name.clone(),
            span,
        },
        Target::Attribute { entity, component, attribute } => Expr::Attribute {
            id: crate::ast::NodeId(u32::MAX),
            entity: entity.clone(),
            component: component.clone(),
            attribute: attribute.clone(),
            span,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, NodeId, Span};

    fn dummy_target(name: &str) -> Target {
        Target::Name(name.to_string())
    }

    #[test]
    fn desugars_plain_augassign_into_assign() {
        let span = Span::new(0, 1);
        let stmt = Stmt::AugAssign {
            id: NodeId(0),
            target: dummy_target("x"),
            op: BinOp::Add,
            value: Expr::Int { id: NodeId(1), value: 1, span },
            span,
        };
        let desugared = desugar_stmt(stmt);
        match desugared {
            Stmt::Assign { target, value: Expr::Binary { op, lhs, rhs, .. }, .. } => {
                assert_eq!(target, dummy_target("x"));
                assert_eq!(op, BinOp::Add);
                assert!(matches!(*lhs, Expr::Name { .. }));
                assert!(matches!(*rhs, Expr::Int { .. }));
            }
            other => panic!("expected Assign with Binary value, got {other:?}"),
        }
    }

    #[test]
    fn recurses_into_if_branches() {
        let span = Span::new(0, 1);
        let inner = Stmt::AugAssign {
            id: NodeId(0),
            target: dummy_target("x"),
            op: BinOp::Mul,
            value: Expr::Int { id: NodeId(1), value: 2, span },
            span,
        };
        let if_stmt = Stmt::If {
            id: NodeId(2),
            cond: Expr::Bool { id: NodeId(3), value: true, span },
            then_body: vec![inner],
            else_body: vec![],
            span,
        };
        let desugared = desugar_stmt(if_stmt);
        match desugared {
            Stmt::If { then_body, .. } => {
                assert!(matches!(then_body[0], Stmt::Assign { .. }));
            }
            other => panic!("expected If, got {other:?}"),
        }
    }
}
