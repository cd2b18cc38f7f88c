//! Rewrites `then if cond else else_` into `Expr::Switch`, the only AST node
//! the lowering pass (`plotter`) treats as conditional.

use crate::ast::{Expr, Stmt};

pub(super) fn rewrite_block(stmts: Vec<Stmt>) -> Vec<Stmt> {
    stmts.into_iter().map(rewrite_stmt).collect()
}

fn rewrite_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Assign { id, target, value, span } => Stmt::Assign {
            id,
            target,
            value: rewrite_expr(value),
            span,
        },
        Stmt::If { id, cond, then_body, else_body, span } => Stmt::If {
            id,
            cond: rewrite_expr(cond),
            then_body: rewrite_block(then_body),
            else_body: rewrite_block(else_body),
            span,
        },
        other => other,
    }
}

fn rewrite_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Ternary { id, cond, then_expr, else_expr, span } => Expr::Switch {
            id,
            cond: Box::new(rewrite_expr(*cond)),
            then_expr: Box::new(rewrite_expr(*then_expr)),
            else_expr: Box::new(rewrite_expr(*else_expr)),
            span,
        },
        Expr::Unary { id, op, operand, span } => Expr::Unary {
            id,
            op,
            operand: Box::new(rewrite_expr(*operand)),
            span,
        },
        Expr::Not { id, operand, span } => Expr::Not {
            id,
            operand: Box::new(rewrite_expr(*operand)),
            span,
        },
        Expr::Binary { id, op, lhs, rhs, span } => Expr::Binary {
            id,
            op,
            lhs: Box::new(rewrite_expr(*lhs)),
            rhs: Box::new(rewrite_expr(*rhs)),
            span,
        },
        Expr::Compare { id, op, lhs, rhs, span } => Expr::Compare {
            id,
            op,
            lhs: Box::new(rewrite_expr(*lhs)),
            rhs: Box::new(rewrite_expr(*rhs)),
            span,
        },
        Expr::BoolOp { id, op, lhs, rhs, span } => Expr::BoolOp {
            id,
            op,
            lhs: Box::new(rewrite_expr(*lhs)),
            rhs: Box::new(rewrite_expr(*rhs)),
            span,
        },
        Expr::Call { id, func, args, span } => Expr::Call {
            id,
            func,
            args: args.into_iter().map(rewrite_expr).collect(),
            span,
        },
        leaf => leaf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn ternary_expression_becomes_switch() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                p.speed.value = 1.0 if p.speed.value > 0.0 else -1.0;
            }"#,
        )
        .unwrap();
        let rewritten = rewrite_block(f.body);
        match &rewritten[1] {
            Stmt::Assign { value: Expr::Switch { .. }, .. } => {}
            other => panic!("expected Switch after rewrite, got {other:?}"),
        }
    }

    #[test]
    fn ternary_nested_in_binary_operand_is_rewritten() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                p.speed.value = (1.0 if p.speed.value > 0.0 else -1.0) + 2.0;
            }"#,
        )
        .unwrap();
        let rewritten = rewrite_block(f.body);
        match &rewritten[1] {
            Stmt::Assign { value: Expr::Binary { lhs, .. }, .. } => {
                assert!(matches!(**lhs, Expr::Switch { .. }));
            }
            other => panic!("expected Binary with Switch lhs, got {other:?}"),
        }
    }
}
