//! Tags every `Name`/`Attribute` expression with its symbol string and base
//! symbol, so later passes (activity, resolve) don't each re-derive it.

use indexmap::IndexMap;

use crate::ast::{Expr, FunctionDef, NodeId, Stmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub symbol: String,
    pub base_symbol: String,
}

pub type SymbolTable = IndexMap<NodeId, SymbolInfo>;

pub fn collect(func: &FunctionDef) -> SymbolTable {
    let mut table = SymbolTable::new();
    collect_block(&func.body, &mut table);
    table
}

fn collect_block(stmts: &[Stmt], table: &mut SymbolTable) {
    for stmt in stmts {
        match stmt {
            Stmt::Assign { value, .. } | Stmt::AugAssign { value, .. } => {
                collect_expr(value, table);
            }
            Stmt::If { cond, then_body, else_body, .. } => {
                collect_expr(cond, table);
                collect_block(then_body, table);
                collect_block(else_body, table);
            }
            Stmt::BindEntity { .. } | Stmt::Docstring { .. } | Stmt::Pass { .. } => {}
        }
    }
}

fn collect_expr(expr: &Expr, table: &mut SymbolTable) {
    match expr {
        Expr::Name { id, name, .. } => {
            table.insert(
                *id,
                SymbolInfo {
                    symbol: name.clone(),
                    base_symbol: name.clone(),
                },
            );
        }
        Expr::Attribute { id, entity, component, attribute, .. } => {
            table.insert(
                *id,
                SymbolInfo {
                    symbol: format!("{entity}.{component}.{attribute}"),
                    base_symbol: entity.clone(),
                },
            );
        }
        other => {
            for child in other.children() {
                collect_expr(child, table);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn attribute_read_gets_dotted_symbol_and_entity_base() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                p.speed.value = p.speed.value;
            }"#,
        )
        .unwrap();
        let table = collect(&f);
        let info = table.values().find(|i| i.symbol == "p.speed.value").unwrap();
        assert_eq!(info.base_symbol, "p");
    }

    #[test]
    fn name_read_has_itself_as_base_symbol() {
        let f = parse(
            r#"def update(self) {
                entity p("speed");
                x = 1.0;
                p.speed.value = x;
            }"#,
        )
        .unwrap();
        let table = collect(&f);
        let info = table.values().find(|i| i.symbol == "x").unwrap();
        assert_eq!(info.base_symbol, "x");
    }
}
