use indexmap::IndexMap;

use entigraph_core::{ComponentDef, Graph};

use crate::plotter::Plotter;
use crate::{analyze, parser, preprocess, transform, Result};

/// Compiles one update function's source into a [`Graph`] against the given
/// component catalog.
///
/// Runs the full pipeline: parse, desugar augmented assignment, analyze
/// (shape/activity) and lint the supported subset, rewrite ternaries into
/// `Switch` nodes, then trace the result through a [`Plotter`] to assemble
/// the graph.
#[tracing::instrument(skip(source, catalog), fields(source_len = source.len()))]
pub fn compile(source: &str, catalog: &IndexMap<String, ComponentDef>) -> Result<Graph> {
    let parsed = parser::parse(source)?;
    tracing::debug!(function = %parsed.name, "parsed function");

    let desugared = preprocess::run(parsed);

    let analysis = analyze::run(&desugared)?;
    tracing::debug!(
        blocks = analysis.activity.len(),
        "analysis complete"
    );

    let transformed = transform::run(desugared);

    let mut plotter = Plotter::new(catalog);
    let graph = plotter.run(&transformed, &analysis.activity)?;
    tracing::info!(
        inputs = graph.inputs().len(),
        outputs = graph.outputs().len(),
        "compiled graph"
    );
    Ok(graph)
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
    fn compiles_a_trivial_increment() {
        let graph = compile(
            r#"def update(self) {
                entity p("position");
                p.position.x = p.position.x + 1.0;
            }"#,
            &catalog(),
        )
        .unwrap();
        assert_eq!(graph.outputs().len(), 1);
    }

    #[test]
    fn rejects_source_with_wrong_arity() {
        let err = compile("def update() { pass; }", &catalog()).unwrap_err();
        assert!(matches!(err, crate::CompileError::UnsupportedInput { .. }));
    }
}
