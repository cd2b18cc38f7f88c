//! Shape analysis of assignment targets. The grammar only has single-name or
//! single-attribute targets, so there is no tuple/unpack assignment to
//! detect — this module exists so that invariant is checked and tested
//! explicitly rather than assumed.

use crate::ast::{Stmt, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignShape {
    pub target_count: usize,
    pub is_unpack: bool,
    pub is_multi: bool,
}

pub fn shape(stmt: &Stmt) -> Option<AssignShape> {
    match stmt {
        Stmt::Assign { .. } | Stmt::AugAssign { .. } => Some(AssignShape {
            target_count: 1,
            is_unpack: false,
            is_multi: false,
        }),
        _ => None,
    }
}

pub fn target_symbol(target: &Target) -> String {
    match target {
        Target::Name(name) => name.clone(),
        Target::Attribute { entity, component, attribute } => {
            format!("{entity}.{component}.{attribute}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, NodeId, Span};

    #[test]
    fn plain_assign_is_never_unpack_or_multi() {
        let span = Span::new(0, 1);
        let stmt = Stmt::Assign {
            id: NodeId(0),
            target: Target::Name("x".to_string()),
            value: Expr::Int { id: NodeId(1), value: 1, span },
            span,
        };
        let s = shape(&stmt).unwrap();
        assert_eq!(s.target_count, 1);
        assert!(!s.is_unpack);
        assert!(!s.is_multi);
    }

    #[test]
    fn attribute_target_symbol_is_dotted() {
        let target = Target::Attribute {
            entity: "p".to_string(),
            component: "position".to_string(),
            attribute: "x".to_string(),
        };
        assert_eq!(target_symbol(&target), "p.position.x");
    }
}
