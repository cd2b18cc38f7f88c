//! [`AttributeRef`]: the triple that uniquely identifies a component field of
//! an entity (spec §3, §6).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeRef {
    pub entity_id: u64,
    pub component: String,
    pub attribute: String,
}

impl AttributeRef {
    pub fn new(entity_id: u64, component: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            entity_id,
            component: component.into(),
            attribute: attribute.into(),
        }
    }

    /// Stable map-key string form: `"{entity_id}/{component}/{attribute}"`.
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.entity_id, self.component, self.attribute)
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_matches_canonical_form() {
        let r = AttributeRef::new(1, "position", "x");
        assert_eq!(r.key(), "1/position/x");
    }

    #[test]
    fn equal_refs_hash_equal() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(AttributeRef::new(1, "position", "x"));
        assert!(set.contains(&AttributeRef::new(1, "position", "x")));
    }
}
