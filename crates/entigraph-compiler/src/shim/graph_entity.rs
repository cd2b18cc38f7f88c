//! One bound entity: its id, and the set of components it was declared
//! with (`entity p("position", "velocity");`), each kept as its own
//! [`GraphComponent`].

use indexmap::IndexMap;

use entigraph_core::ComponentDef;

use super::{GraphComponent, ShimError};

#[derive(Clone)]
pub struct GraphEntity {
    entity_id: u64,
    components: IndexMap<String, GraphComponent>,
}

impl GraphEntity {
    /// Binds `entity_id` to the named components, looked up in `catalog` by
    /// name. Rejects a name bound twice or a name absent from the catalog.
    pub fn new(
        entity_id: u64,
        names: &[String],
        catalog: &IndexMap<String, ComponentDef>,
    ) -> Result<Self, ShimError> {
        let mut components = IndexMap::new();
        for name in names {
            if components.contains_key(name) {
                return Err(ShimError::DuplicateComponents {
                    component: name.clone(),
                });
            }
            let def = catalog.get(name).cloned().ok_or_else(|| ShimError::UnknownComponent {
                entity: entity_id.to_string(),
                component: name.clone(),
            })?;
            components.insert(name.clone(), GraphComponent::new(entity_id, def));
        }
        Ok(Self { entity_id, components })
    }

    pub fn entity_id(&self) -> u64 {
        self.entity_id
    }

    pub fn component(&mut self, name: &str) -> Result<&mut GraphComponent, ShimError> {
        self.components.get_mut(name).ok_or_else(|| ShimError::UnknownComponent {
            entity: self.entity_id.to_string(),
            component: name.to_string(),
        })
    }

    pub fn components(&self) -> impl Iterator<Item = &GraphComponent> {
        self.components.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entigraph_core::{PrimitiveKind, Type};

    fn catalog() -> IndexMap<String, ComponentDef> {
        let mut schema = IndexMap::new();
        schema.insert("x".to_string(), Type::Primitive(PrimitiveKind::Float64));
        let mut catalog = IndexMap::new();
        catalog.insert("position".to_string(), ComponentDef::new("position", schema));
        catalog
    }

    #[test]
    fn binds_known_components() {
        let entity = GraphEntity::new(1, &["position".to_string()], &catalog()).unwrap();
        assert_eq!(entity.entity_id(), 1);
    }

    #[test]
    fn rejects_unknown_component_name() {
        let err = GraphEntity::new(1, &["velocity".to_string()], &catalog()).unwrap_err();
        assert!(matches!(err, ShimError::UnknownComponent { .. }));
    }

    #[test]
    fn rejects_duplicate_component_name() {
        let err = GraphEntity::new(
            1,
            &["position".to_string(), "position".to_string()],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, ShimError::DuplicateComponents { .. }));
    }
}
