//! The computation-graph IR (spec §3): [`Node`] is the tagged union of
//! constants, attribute reads/writes, and pure operators.

use crate::attr_ref::AttributeRef;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A node in the computation graph IR.
///
/// Retrieve may only appear as a leaf feeding operators, or as the `to`
/// inside a Mutate's expression tree. Mutate only ever appears at graph top
/// level, never nested inside an operator. Operators are pure: two `Node`s
/// built from identical sub-trees are structurally equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Const(Value),
    Retrieve(AttributeRef),
    Mutate {
        target: AttributeRef,
        to: Box<Node>,
    },

    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Mod(Box<Node>, Box<Node>),
    Pow(Box<Node>, Box<Node>),
    Max(Box<Node>, Box<Node>),
    Min(Box<Node>, Box<Node>),
    Abs(Box<Node>),
    Floor(Box<Node>),
    Ceil(Box<Node>),

    Sin(Box<Node>),
    Cos(Box<Node>),
    Tan(Box<Node>),
    ArcSin(Box<Node>),
    ArcCos(Box<Node>),
    ArcTan(Box<Node>),

    Random(Box<Node>, Box<Node>),

    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Not(Box<Node>),
    Eq(Box<Node>, Box<Node>),
    Gt(Box<Node>, Box<Node>),
    Lt(Box<Node>, Box<Node>),
    Ge(Box<Node>, Box<Node>),
    Le(Box<Node>, Box<Node>),

    Switch {
        condition: Box<Node>,
        true_branch: Box<Node>,
        false_branch: Box<Node>,
    },
}

impl Node {
    pub fn mutate(target: AttributeRef, to: Node) -> Self {
        Node::Mutate {
            target,
            to: Box::new(to),
        }
    }

    pub fn switch(condition: Node, true_branch: Node, false_branch: Node) -> Self {
        Node::Switch {
            condition: Box::new(condition),
            true_branch: Box::new(true_branch),
            false_branch: Box::new(false_branch),
        }
    }

    /// The `to` expression if this is a Mutate, else `None`.
    pub fn mutate_to(&self) -> Option<&Node> {
        match self {
            Node::Mutate { to, .. } => Some(to),
            _ => None,
        }
    }

    /// Walk this node's sub-tree, collecting every `AttributeRef` referenced
    /// by a nested Retrieve. Used to enforce the "every Retrieve inside an
    /// output's `to` appears in the graph's inputs" invariant (spec §3, §8).
    pub fn retrieved_refs(&self) -> Vec<&AttributeRef> {
        let mut out = Vec::new();
        self.collect_retrieves(&mut out);
        out
    }

    fn collect_retrieves<'a>(&'a self, out: &mut Vec<&'a AttributeRef>) {
        match self {
            Node::Const(_) => {}
            Node::Retrieve(r) => out.push(r),
            Node::Mutate { to, .. } => to.collect_retrieves(out),
            Node::Add(a, b)
            | Node::Sub(a, b)
            | Node::Mul(a, b)
            | Node::Div(a, b)
            | Node::Mod(a, b)
            | Node::Pow(a, b)
            | Node::Max(a, b)
            | Node::Min(a, b)
            | Node::Random(a, b)
            | Node::And(a, b)
            | Node::Or(a, b)
            | Node::Eq(a, b)
            | Node::Gt(a, b)
            | Node::Lt(a, b)
            | Node::Ge(a, b)
            | Node::Le(a, b) => {
                a.collect_retrieves(out);
                b.collect_retrieves(out);
            }
            Node::Abs(a)
            | Node::Floor(a)
            | Node::Ceil(a)
            | Node::Sin(a)
            | Node::Cos(a)
            | Node::Tan(a)
            | Node::ArcSin(a)
            | Node::ArcCos(a)
            | Node::ArcTan(a)
            | Node::Not(a) => a.collect_retrieves(out),
            Node::Switch {
                condition,
                true_branch,
                false_branch,
            } => {
                condition.collect_retrieves(out);
                true_branch.collect_retrieves(out);
                false_branch.collect_retrieves(out);
            }
        }
    }
}
