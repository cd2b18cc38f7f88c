//! Compiler that lowers an update-function's source into an
//! `entigraph_core::Graph`: parse -> preprocess -> analyze -> lint ->
//! transform -> materialize -> trace -> emit.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod compile;
pub mod demos;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod plotter;
pub mod shim;

mod analyze;
mod preprocess;
mod transform;

pub use ast::Span;
pub use compile::compile;
pub use shim::ShimError;

use thiserror::Error;

/// Every error the pipeline can raise.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The source fails the linter's shape checks: wrong arity, a generator,
    /// a non-function, or a syntax error in the surface grammar.
    #[error("unsupported input: {message}")]
    UnsupportedInput { message: String },

    /// A rewrite hit a control-flow pattern it cannot lower: a symbol
    /// conditionally written in only one branch and read later without a
    /// default.
    #[error("unsupported control flow: {message}")]
    UnsupportedControlFlow { message: String, span: Span },

    /// The transformed AST could not be materialized into a graph.
    #[error("materialization failed: {0}")]
    MaterializationFailure(String),

    /// A shim-level lookup failure while tracing (unknown entity, component,
    /// or attribute, or a duplicate component name).
    #[error(transparent)]
    Shim(#[from] ShimError),

    /// A host value could not be lifted into a typed `Value`.
    #[error(transparent)]
    Value(#[from] entigraph_core::ValueError),

    /// The assembled graph violated an invariant (dangling retrieve).
    #[error(transparent)]
    Graph(#[from] entigraph_core::GraphError),
}

pub type Result<T> = std::result::Result<T, CompileError>;
