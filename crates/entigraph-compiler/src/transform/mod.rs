//! AST-level rewrites that run after analysis and before lowering.
//!
//! `if`/`elif`/`else` is not rewritten here: merging the two branches into a
//! `Node::Switch` needs the *graph values* each branch produces, not just
//! their AST shape, so that merge happens during lowering in
//! [`crate::plotter`] (`Plotter::lower_if`), guided by the activity table
//! this module's caller already computed.

mod ternary;

use crate::ast::FunctionDef;

pub fn run(func: FunctionDef) -> FunctionDef {
    FunctionDef {
        body: ternary::rewrite_block(func.body),
        ..func
    }
}
