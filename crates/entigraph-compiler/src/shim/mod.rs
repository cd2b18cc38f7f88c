//! The tracing-time shim: stand-ins for "the entity/component the surface
//! syntax names" that the lowering pass consults while walking the AST.
//!
//! Named after the original system's runtime objects of the same shape
//! (`GraphEntity`, `GraphComponent`, a plain operator-overloaded node
//! value) — this crate never talks to anything resembling that runtime, it
//! just keeps the same three-level lookup structure when resolving
//! `entity.component.attribute`.

pub mod graph_component;
pub mod graph_entity;
pub mod graph_node;

pub use graph_component::GraphComponent;
pub use graph_entity::GraphEntity;
pub use graph_node::GraphNode;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShimError {
    #[error("unknown entity '{name}'")]
    UnknownEntity { name: String },

    #[error("entity '{entity}' has no component '{component}'")]
    UnknownComponent { entity: String, component: String },

    #[error("component '{component}' has no attribute '{attribute}'")]
    UnknownAttribute { component: String, attribute: String },

    #[error("entity binds component '{component}' more than once")]
    DuplicateComponents { component: String },
}
