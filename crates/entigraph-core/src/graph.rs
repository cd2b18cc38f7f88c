//! [`Graph`]: the compiled output of the pipeline — an ordered set of
//! attribute reads feeding an ordered set of attribute writes (spec §3).

use crate::attr_ref::AttributeRef;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single input: an attribute the graph reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub attr: AttributeRef,
}

/// A single output: an attribute the graph writes, and the expression
/// computing the new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub target: AttributeRef,
    pub to: Node,
}

/// The compiled computation graph: ordered inputs, ordered outputs.
///
/// Invariants (spec §3, enforced by [`Graph::new`]):
/// 1. Every `Retrieve` referenced anywhere in an output's `to` expression
///    must, by `AttributeRef` equality, appear among `inputs`.
/// 2. `inputs` is ordered by first-appearance in the source; `outputs` by
///    last-write order (the final assignment to an attribute wins).
///
/// A `Graph` is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("output for {target} reads {missing}, which is not among the graph's inputs")]
    DanglingRetrieve {
        target: AttributeRef,
        missing: AttributeRef,
    },
}

impl Graph {
    /// Build a `Graph` from already-ordered inputs and outputs, checking
    /// invariant 1. Callers (the compile driver, via `GraphComponent`'s
    /// insertion-ordered maps) are responsible for invariant 2's ordering.
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Result<Self, GraphError> {
        for output in &outputs {
            for referenced in output.to.retrieved_refs() {
                if !inputs.iter().any(|i| &i.attr == referenced) {
                    return Err(GraphError::DanglingRetrieve {
                        target: output.target.clone(),
                        missing: referenced.clone(),
                    });
                }
            }
        }
        Ok(Graph { inputs, outputs })
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// A human-readable rendering of the graph, one input/output per line.
    /// Used for debug logging and snapshot tests; not a stable wire format
    /// (postcard/serde_json cover that — see `to_bytes`/`Serialize`).
    pub fn render(&self) -> String {
        let mut out = String::from("inputs:\n");
        for input in &self.inputs {
            out.push_str(&format!("  - {}\n", input.attr));
        }
        out.push_str("outputs:\n");
        for output in &self.outputs {
            out.push_str(&format!("  - {}: {:?}\n", output.target, output.to));
        }
        out
    }

    /// Pretty-printed JSON dump of the graph, standing in for a debug YAML
    /// rendering. `serde_yaml` is unmaintained; `serde_json`'s pretty
    /// printer is a readable-enough substitute for logging and bug reports.
    pub fn to_yaml(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Canonical byte-exact serialization (spec §6, §8). A `Vec`-returning
/// sibling to the fixed-capacity `postcard::to_vec`, so graphs of unbounded
/// size never overflow a stack buffer.
pub fn to_bytes(graph: &Graph) -> postcard::Result<Vec<u8>> {
    postcard::to_allocvec(graph)
}

pub fn from_bytes(bytes: &[u8]) -> postcard::Result<Graph> {
    postcard::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::wrap_int;

    fn attr(n: &str) -> AttributeRef {
        AttributeRef::new(1, "position", n)
    }

    #[test]
    fn accepts_output_whose_retrieve_is_in_inputs() {
        let x = attr("x");
        let graph = Graph::new(
            vec![Input { attr: x.clone() }],
            vec![Output {
                target: attr("y"),
                to: Node::Add(
                    Box::new(Node::Retrieve(x)),
                    Box::new(Node::Const(wrap_int(1))),
                ),
            }],
        );
        assert!(graph.is_ok());
    }

    #[test]
    fn rejects_output_with_dangling_retrieve() {
        let err = Graph::new(
            vec![],
            vec![Output {
                target: attr("y"),
                to: Node::Retrieve(attr("x")),
            }],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingRetrieve {
                target: attr("y"),
                missing: attr("x"),
            }
        );
    }

    #[test]
    fn byte_roundtrip_preserves_structure() {
        let graph = Graph::new(
            vec![Input { attr: attr("x") }],
            vec![Output {
                target: attr("x"),
                to: Node::Retrieve(attr("x")),
            }],
        )
        .unwrap();
        let bytes = to_bytes(&graph).unwrap();
        let back = from_bytes(&bytes).unwrap();
        assert_eq!(graph, back);
    }

    #[test]
    fn to_yaml_produces_pretty_json_with_both_sections() {
        let graph = Graph::new(
            vec![Input { attr: attr("x") }],
            vec![Output {
                target: attr("x"),
                to: Node::Retrieve(attr("x")),
            }],
        )
        .unwrap();
        let rendered = graph.to_yaml().unwrap();
        assert!(rendered.contains("\"inputs\""));
        assert!(rendered.contains("\"outputs\""));
    }

    #[test]
    fn identical_graphs_serialize_byte_identically() {
        let a = Graph::new(
            vec![Input { attr: attr("x") }],
            vec![Output {
                target: attr("x"),
                to: Node::Retrieve(attr("x")),
            }],
        )
        .unwrap();
        let b = a.clone();
        assert_eq!(to_bytes(&a).unwrap(), to_bytes(&b).unwrap());
    }
}
