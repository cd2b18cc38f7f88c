//! Example component schemas used by integration tests, mirroring
//! `bento/example/specs.py`.

use indexmap::IndexMap;

use entigraph_core::{ComponentDef, PrimitiveKind, Type};

fn schema(fields: &[(&str, PrimitiveKind)]) -> IndexMap<String, Type> {
    fields
        .iter()
        .map(|(name, kind)| (name.to_string(), Type::Primitive(*kind)))
        .collect()
}

pub fn position() -> ComponentDef {
    ComponentDef::new(
        "position",
        schema(&[("x", PrimitiveKind::Float64), ("y", PrimitiveKind::Float64)]),
    )
}

pub fn velocity() -> ComponentDef {
    ComponentDef::new(
        "velocity",
        schema(&[("x", PrimitiveKind::Float64), ("y", PrimitiveKind::Float64)]),
    )
}

pub fn speed() -> ComponentDef {
    ComponentDef::new(
        "speed",
        schema(&[("max_x", PrimitiveKind::Float64), ("max_y", PrimitiveKind::Float64)]),
    )
}

pub fn clock() -> ComponentDef {
    ComponentDef::new("clock", schema(&[("tick_ms", PrimitiveKind::Int64)]))
}

pub fn keyboard() -> ComponentDef {
    ComponentDef::new("keyboard", schema(&[("pressed", PrimitiveKind::String)]))
}

/// The full example catalog, keyed by component name, as used by the
/// original SDK's demo simulations (a mountain-car-style example world).
pub fn catalog() -> IndexMap<String, ComponentDef> {
    [position(), velocity(), speed(), clock(), keyboard()]
        .into_iter()
        .map(|def| (def.name.clone(), def))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_every_example_component() {
        let catalog = catalog();
        for name in ["position", "velocity", "speed", "clock", "keyboard"] {
            assert!(catalog.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn position_has_x_and_y_float_fields() {
        let def = position();
        assert_eq!(def.attribute_type("x"), Some(&Type::Primitive(PrimitiveKind::Float64)));
        assert_eq!(def.attribute_type("y"), Some(&Type::Primitive(PrimitiveKind::Float64)));
    }
}
