#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the entigraph compiler: the value model,
//! the attribute-reference key type, the computation-graph IR, the ECS
//! collaborator contracts, and the engine client contract.
//!
//! This crate has no parsing or analysis logic of its own — it is the data
//! model `entigraph-compiler` builds and consumes.

pub mod attr_ref;
pub mod ecs;
pub mod engine;
pub mod graph;
pub mod interner;
pub mod node;
pub mod value;

pub use attr_ref::AttributeRef;
pub use ecs::{ComponentDef, EntityDef, SimulationDef, SystemDef};
pub use engine::{EngineClient, EngineError, EngineStatus};
pub use graph::{Graph, GraphError, Input, Output};
pub use interner::{Interner, Symbol};
pub use node::Node;
pub use value::{HostValue, Primitive, PrimitiveKind, Type, Value, ValueError};
