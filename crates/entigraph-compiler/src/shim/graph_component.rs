//! One entity's one component: owns the attribute schema and remembers
//! every attribute write (as the replacement expression) made against it
//! while tracing a function body. Reads are cached globally by the
//! [`Plotter`](crate::plotter::Plotter), not here, so that first-read
//! order reflects the whole trace rather than one component at a time.

use indexmap::{IndexMap, IndexSet};

use entigraph_core::{AttributeRef, ComponentDef, Node};

use super::{GraphNode, ShimError};

#[derive(Clone)]
pub struct GraphComponent {
    entity_id: u64,
    def: ComponentDef,
    outputs_map: IndexMap<String, Node>,
}

impl GraphComponent {
    pub fn new(entity_id: u64, def: ComponentDef) -> Self {
        Self {
            entity_id,
            def,
            outputs_map: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Reads an attribute. A previously-written value (read-after-write
    /// within the same trace) wins over a fresh `Retrieve`, matching
    /// ordinary variable semantics. A fresh read is recorded into
    /// `shared_inputs`, the plotter-wide first-read-order set.
    pub fn get(
        &mut self,
        attribute: &str,
        shared_inputs: &mut IndexSet<AttributeRef>,
    ) -> Result<GraphNode, ShimError> {
        self.check_attribute(attribute)?;
        if let Some(written) = self.outputs_map.get(attribute) {
            return Ok(GraphNode(written.clone()));
        }
        let attr_ref = AttributeRef::new(self.entity_id, self.name(), attribute);
        shared_inputs.insert(attr_ref.clone());
        Ok(GraphNode(Node::Retrieve(attr_ref)))
    }

    /// Writes an attribute, dropping the write entirely when it is a pure
    /// self-assignment (`x = x`, i.e. the value is just a `Retrieve` of
    /// this very attribute) — matching `bento/ecs/graph.py::set_attr`'s
    /// "ignore attribute self assignments" step. The read that produced
    /// the value (if any) has already been recorded in `shared_inputs` by
    /// `get`, so dropping the write still leaves the read visible.
    pub fn set(&mut self, attribute: &str, value: GraphNode) -> Result<(), ShimError> {
        self.check_attribute(attribute)?;
        let self_ref = AttributeRef::new(self.entity_id, self.name(), attribute);
        if matches!(value.node(), Node::Retrieve(r) if *r == self_ref) {
            return Ok(());
        }
        self.outputs_map.insert(attribute.to_string(), value.into_node());
        Ok(())
    }

    fn check_attribute(&self, attribute: &str) -> Result<(), ShimError> {
        if self.def.attribute_type(attribute).is_none() {
            return Err(ShimError::UnknownAttribute {
                component: self.name().to_string(),
                attribute: attribute.to_string(),
            });
        }
        Ok(())
    }

    /// Every `(attribute, expression)` pair written during tracing, in
    /// write order.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.outputs_map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entigraph_core::{PrimitiveKind, Type};
    use indexmap::IndexMap;

    fn position_def() -> ComponentDef {
        let mut schema = IndexMap::new();
        schema.insert("x".to_string(), Type::Primitive(PrimitiveKind::Float64));
        schema.insert("y".to_string(), Type::Primitive(PrimitiveKind::Float64));
        ComponentDef::new("position", schema)
    }

    #[test]
    fn get_unknown_attribute_errors() {
        let mut c = GraphComponent::new(1, position_def());
        let mut inputs = IndexSet::new();
        let err = c.get("z", &mut inputs).unwrap_err();
        assert!(matches!(err, ShimError::UnknownAttribute { .. }));
    }

    #[test]
    fn first_read_is_recorded_in_shared_inputs() {
        let mut c = GraphComponent::new(1, position_def());
        let mut inputs = IndexSet::new();
        c.get("x", &mut inputs).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0], AttributeRef::new(1, "position", "x"));
    }

    #[test]
    fn read_after_write_returns_the_written_expression_not_a_retrieve() {
        let mut c = GraphComponent::new(1, position_def());
        c.set("x", GraphNode::constant(5.0)).unwrap();
        let mut inputs = IndexSet::new();
        let read = c.get("x", &mut inputs).unwrap();
        assert!(matches!(read.node(), Node::Const(_)));
        assert!(inputs.is_empty());
    }

    #[test]
    fn self_assignment_is_dropped_but_the_read_is_still_recorded() {
        let mut c = GraphComponent::new(1, position_def());
        let mut inputs = IndexSet::new();
        let read = c.get("x", &mut inputs).unwrap();
        c.set("x", read).unwrap();
        assert_eq!(c.outputs().count(), 0);
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn assigning_a_different_expression_is_kept() {
        let mut c = GraphComponent::new(1, position_def());
        c.set("x", GraphNode::constant(1.0)).unwrap();
        assert_eq!(c.outputs().count(), 1);
    }
}
