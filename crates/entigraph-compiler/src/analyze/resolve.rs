//! Resolves every local-variable read to the statement that defines it.
//!
//! Attribute reads (`entity.component.attribute`) aren't resolved here —
//! those are validated against the entity's schema during tracing
//! (`shim::graph_component`), not against lexical scope.

use indexmap::IndexMap;

use super::activity::ActivityTable;
use crate::ast::{Expr, NodeId, Stmt, Target};

pub type Definitions = IndexMap<NodeId, NodeId>;

pub fn resolve(body: &[Stmt], activity: &ActivityTable) -> Definitions {
    let mut defs = Definitions::new();
    let mut scope = IndexMap::new();
    resolve_block(body, &mut scope, activity, &mut defs);
    defs
}

fn resolve_block(
    stmts: &[Stmt],
    scope: &mut IndexMap<String, NodeId>,
    activity: &ActivityTable,
    defs: &mut Definitions,
) {
    for stmt in stmts {
        match stmt {
            Stmt::BindEntity { name, id, .. } => {
                scope.insert(name.clone(), *id);
            }
            Stmt::Docstring { .. } | Stmt::Pass { .. } => {}
            Stmt::Assign { target, value, id, .. } | Stmt::AugAssign { target, value, id, .. } => {
                resolve_expr(value, scope, defs);
                if let Target::Name(name) = target {
                    scope.insert(name.clone(), *id);
                }
            }
            Stmt::If { cond, then_body, else_body, id, .. } => {
                resolve_expr(cond, scope, defs);
                let mut then_scope = scope.clone();
                resolve_block(then_body, &mut then_scope, activity, defs);
                let mut else_scope = scope.clone();
                resolve_block(else_body, &mut else_scope, activity, defs);
                if let Some(act) = activity.get(id) {
                    for sym in &act.output_syms {
                        if !sym.contains('.') {
                            scope.insert(sym.clone(), *id);
                        }
                    }
                }
            }
        }
    }
}

fn resolve_expr(expr: &Expr, scope: &IndexMap<String, NodeId>, defs: &mut Definitions) {
    match expr {
        Expr::Name { id, name, .. } => {
            if let Some(def) = scope.get(name) {
                defs.insert(*id, *def);
            }
        }
        Expr::Attribute { .. } => {}
        other => {
            for child in other.children() {
                resolve_expr(child, scope, defs);
            }
        }
    }
}
