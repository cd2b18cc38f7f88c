//! Flags expressions that are literal constants, independent of any entity
//! or local-variable state. `transform`/`plotter` use this to build a
//! `Node::Const` directly instead of routing a literal through the general
//! expression lowering path.

use crate::ast::Expr;

pub fn is_constant(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Int { .. } | Expr::Float { .. } | Expr::Bool { .. } | Expr::Str { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeId, Span};

    #[test]
    fn literals_are_constant() {
        let span = Span::new(0, 1);
        assert!(is_constant(&Expr::Int { id: NodeId(0), value: 1, span }));
        assert!(is_constant(&Expr::Bool { id: NodeId(0), value: true, span }));
    }

    #[test]
    fn names_and_attributes_are_not_constant() {
        let span = Span::new(0, 1);
        assert!(!is_constant(&Expr::Name {
            id: NodeId(0),
            name: "x".to_string(),
            span
        }));
    }
}
