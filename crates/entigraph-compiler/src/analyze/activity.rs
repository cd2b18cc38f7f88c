//! Per-block read/write sets for `if`/`else` bodies.
//!
//! For every `If` node, `input_syms` are symbols read before any write
//! within either branch, and `output_syms` are symbols written anywhere in
//! either branch. `transform::ifelse` uses `output_syms` to know which
//! locals and attributes need a `Node::Switch` merging the two branches, and
//! `lint::check_control_flow` uses the asymmetry between the two branches'
//! own write sets to catch the one case the spec treats as an error: a
//! symbol written in only one branch and then read later with no default.

use indexmap::IndexSet;

use super::assign::target_symbol;
use crate::ast::{Expr, NodeId, Stmt};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub input_syms: IndexSet<String>,
    pub output_syms: IndexSet<String>,
    pub base_in_syms: IndexSet<String>,
    pub base_out_syms: IndexSet<String>,
}

pub type ActivityTable = indexmap::IndexMap<NodeId, Activity>;

pub fn analyze(body: &[Stmt]) -> ActivityTable {
    let mut table = ActivityTable::new();
    collect_block(body, &mut table);
    table
}

/// The set of symbols written anywhere in `body`, including inside nested
/// `if`s (whose own write sets were already folded in by `collect_block`).
pub fn block_writes(body: &[Stmt]) -> IndexSet<String> {
    let mut table = ActivityTable::new();
    let (_, output) = collect_block(body, &mut table);
    output
}

fn collect_block(stmts: &[Stmt], table: &mut ActivityTable) -> (IndexSet<String>, IndexSet<String>) {
    let mut input = IndexSet::new();
    let mut output = IndexSet::new();

    for stmt in stmts {
        match stmt {
            Stmt::BindEntity { .. } | Stmt::Docstring { .. } | Stmt::Pass { .. } => {}
            Stmt::Assign { target, value, .. } | Stmt::AugAssign { target, value, .. } => {
                collect_expr_reads(value, &output, &mut input);
                output.insert(target_symbol(target));
            }
            Stmt::If { id, cond, then_body, else_body, .. } => {
                collect_expr_reads(cond, &output, &mut input);
                let (in_then, out_then) = collect_block(then_body, table);
                let (in_else, out_else) = collect_block(else_body, table);

                let out_syms: IndexSet<String> = out_then.union(&out_else).cloned().collect();
                let in_syms: IndexSet<String> = in_then.union(&in_else).cloned().collect();
                let base_out: IndexSet<String> = out_syms.iter().map(|s| base_of(s)).collect();
                let base_in: IndexSet<String> = in_syms.iter().map(|s| base_of(s)).collect();

                table.insert(
                    *id,
                    Activity {
                        input_syms: in_syms.clone(),
                        output_syms: out_syms.clone(),
                        base_in_syms: base_in,
                        base_out_syms: base_out,
                    },
                );

                for sym in in_syms {
                    if !output.contains(&sym) {
                        input.insert(sym);
                    }
                }
                for sym in out_syms {
                    output.insert(sym);
                }
            }
        }
    }

    (input, output)
}

fn collect_expr_reads(expr: &Expr, output_so_far: &IndexSet<String>, input: &mut IndexSet<String>) {
    if let Some(sym) = expr_symbol(expr) {
        if !output_so_far.contains(&sym) {
            input.insert(sym);
        }
        return;
    }
    for child in expr.children() {
        collect_expr_reads(child, output_so_far, input);
    }
}

fn expr_symbol(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name { name, .. } => Some(name.clone()),
        Expr::Attribute { entity, component, attribute, .. } => {
            Some(format!("{entity}.{component}.{attribute}"))
        }
        _ => None,
    }
}

fn base_of(symbol: &str) -> String {
    symbol.split('.').next().unwrap_or(symbol).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn if_block_reads_input_and_writes_output() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                if p.speed.value > 0.0 {
                    p.speed.value = p.speed.value + 1.0;
                }
            }"#,
        )
        .unwrap();
        let table = analyze(&f.body);
        let activity = table.values().next().unwrap();
        assert!(activity.input_syms.contains("p.speed.value"));
        assert!(activity.output_syms.contains("p.speed.value"));
        assert!(activity.base_out_syms.contains("p"));
    }

    #[test]
    fn write_before_read_in_same_block_is_not_an_input() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                if True {
                    x = 1.0;
                    p.speed.value = x;
                }
            }"#,
        )
        .unwrap();
        let table = analyze(&f.body);
        let activity = table.values().next().unwrap();
        assert!(!activity.input_syms.contains("x"));
        assert!(activity.output_syms.contains("x"));
    }
}
