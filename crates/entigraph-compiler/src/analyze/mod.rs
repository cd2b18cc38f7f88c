//! Semantic analysis over the parsed (and preprocessed) AST: shape, symbol,
//! activity, and definition analyses, followed by the lint pass that
//! enforces the supported subset.

pub mod activity;
pub mod assign;
pub mod constants;
pub mod func;
pub mod lint;
pub mod resolve;
pub mod symbol;

use crate::ast::FunctionDef;
use crate::Result;

pub struct Analysis {
    pub shape: func::FuncShape,
    pub activity: activity::ActivityTable,
    pub symbols: symbol::SymbolTable,
    pub definitions: resolve::Definitions,
}

pub fn run(func: &FunctionDef) -> Result<Analysis> {
    let shape = func::shape(func);
    lint::check_shape(&shape)?;

    let activity = activity::analyze(&func.body);
    lint::check_control_flow(&func.body, &activity)?;

    let symbols = symbol::collect(func);
    let definitions = resolve::resolve(&func.body, &activity);

    Ok(Analysis { shape, activity, symbols, definitions })
}
