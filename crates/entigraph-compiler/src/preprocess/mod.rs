//! Desugaring passes that run on the parsed AST before analysis.

mod augassign;

use crate::ast::FunctionDef;

/// Rewrites every `AugAssign` into an equivalent `Assign`, so later passes
/// only ever see one assignment shape.
pub fn run(func: FunctionDef) -> FunctionDef {
    FunctionDef {
        body: augassign::desugar_block(func.body),
        ..func
    }
}
