//! ECS collaborator contracts: plain data types describing components,
//! entities, systems, and whole simulations (spec §3, grounded in
//! `bento/ecs/spec.py` and `bento/spec/sim.py`).
//!
//! These are the compiler's input (`ComponentDef`/`EntityDef` schemas
//! resolved by the plotter) and output (`SystemDef`/`SimulationDef` carrying
//! compiled [`Graph`]s) types, not a runtime ECS implementation.

use crate::graph::Graph;
use crate::value::Type;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Specifies an ECS component by its name and attribute schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub name: String,
    /// Attribute name to its declared type, in declaration order.
    pub schema: IndexMap<String, Type>,
}

impl ComponentDef {
    pub fn new(name: impl Into<String>, schema: IndexMap<String, Type>) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn attribute_type(&self, attribute: &str) -> Option<&Type> {
        self.schema.get(attribute)
    }
}

/// Specifies an ECS entity by the components attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub entity_id: u64,
    pub components: Vec<String>,
}

impl EntityDef {
    pub fn new(entity_id: u64, components: Vec<String>) -> Self {
        Self {
            entity_id,
            components,
        }
    }
}

/// Specifies an ECS system by its compiled computation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDef {
    pub graph: Graph,
}

impl SystemDef {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}

/// Specifies a whole simulation: its component/entity inventory, systems,
/// and an init graph used to seed attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDef {
    pub name: String,
    pub components: Vec<ComponentDef>,
    pub entities: Vec<EntityDef>,
    pub systems: Vec<SystemDef>,
    pub init_graph: Graph,
}

impl SimulationDef {
    pub fn new(
        name: impl Into<String>,
        components: Vec<ComponentDef>,
        entities: Vec<EntityDef>,
        systems: Vec<SystemDef>,
        init_graph: Graph,
    ) -> Self {
        Self {
            name: name.into(),
            components,
            entities,
            systems,
            init_graph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{PrimitiveKind, Type};

    fn position_schema() -> IndexMap<String, Type> {
        let mut schema = IndexMap::new();
        schema.insert("x".to_string(), Type::primitive(PrimitiveKind::Float64));
        schema.insert("y".to_string(), Type::primitive(PrimitiveKind::Float64));
        schema
    }

    #[test]
    fn component_def_looks_up_attribute_types_by_name() {
        let def = ComponentDef::new("position", position_schema());
        assert_eq!(
            def.attribute_type("x"),
            Some(&Type::primitive(PrimitiveKind::Float64))
        );
        assert_eq!(def.attribute_type("missing"), None);
    }

    #[test]
    fn entity_def_carries_its_component_name_set() {
        let entity = EntityDef::new(7, vec!["position".to_string(), "velocity".to_string()]);
        assert_eq!(entity.components.len(), 2);
    }
}
