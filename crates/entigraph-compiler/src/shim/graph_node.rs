//! `GraphNode`: a lowered expression value carried around while tracing an
//! update function. Wraps a `Node` and overloads the arithmetic operators so
//! the lowering pass (`plotter`) can build `+`/`-`/`*`/`/`/`%` expressions
//! the same way the surface syntax does, instead of calling `Node::Add`
//! etc. by hand at every binary-expression site.
//!
//! Comparisons and boolean connectives aren't exposed through `PartialOrd`/
//! `PartialEq`/`BitAnd` — those traits are fixed to return `bool`, and a
//! graph comparison must instead produce another `GraphNode` carrying a
//! `Node::Gt`/`Node::Eq`/etc, so they're plain methods instead.

use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use entigraph_core::{value::wrap_f64, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode(pub Node);

impl GraphNode {
    pub fn constant(value: f64) -> Self {
        GraphNode(Node::Const(wrap_f64(value)))
    }

    pub fn into_node(self) -> Node {
        self.0
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn pow(self, exp: GraphNode) -> GraphNode {
        GraphNode(Node::Pow(Box::new(self.0), Box::new(exp.0)))
    }

    pub fn max(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Max(Box::new(self.0), Box::new(other.0)))
    }

    pub fn min(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Min(Box::new(self.0), Box::new(other.0)))
    }

    pub fn abs(self) -> GraphNode {
        GraphNode(Node::Abs(Box::new(self.0)))
    }

    pub fn floor(self) -> GraphNode {
        GraphNode(Node::Floor(Box::new(self.0)))
    }

    pub fn ceil(self) -> GraphNode {
        GraphNode(Node::Ceil(Box::new(self.0)))
    }

    pub fn sin(self) -> GraphNode {
        GraphNode(Node::Sin(Box::new(self.0)))
    }

    pub fn cos(self) -> GraphNode {
        GraphNode(Node::Cos(Box::new(self.0)))
    }

    pub fn tan(self) -> GraphNode {
        GraphNode(Node::Tan(Box::new(self.0)))
    }

    pub fn asin(self) -> GraphNode {
        GraphNode(Node::ArcSin(Box::new(self.0)))
    }

    pub fn acos(self) -> GraphNode {
        GraphNode(Node::ArcCos(Box::new(self.0)))
    }

    pub fn atan(self) -> GraphNode {
        GraphNode(Node::ArcTan(Box::new(self.0)))
    }

    pub fn random(lo: GraphNode, hi: GraphNode) -> GraphNode {
        GraphNode(Node::Random(Box::new(lo.0), Box::new(hi.0)))
    }

    pub fn and(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::And(Box::new(self.0), Box::new(other.0)))
    }

    pub fn or(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Or(Box::new(self.0), Box::new(other.0)))
    }

    pub fn not(self) -> GraphNode {
        GraphNode(Node::Not(Box::new(self.0)))
    }

    pub fn eq_(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Eq(Box::new(self.0), Box::new(other.0)))
    }

    pub fn not_eq(self, other: GraphNode) -> GraphNode {
        self.eq_(other).not()
    }

    pub fn gt(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Gt(Box::new(self.0), Box::new(other.0)))
    }

    pub fn lt(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Lt(Box::new(self.0), Box::new(other.0)))
    }

    pub fn ge(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Ge(Box::new(self.0), Box::new(other.0)))
    }

    pub fn le(self, other: GraphNode) -> GraphNode {
        GraphNode(Node::Le(Box::new(self.0), Box::new(other.0)))
    }

    pub fn switch(condition: GraphNode, true_branch: GraphNode, false_branch: GraphNode) -> Self {
        GraphNode(Node::switch(condition.0, true_branch.0, false_branch.0))
    }
}

impl Add for GraphNode {
    type Output = GraphNode;
    fn add(self, rhs: GraphNode) -> GraphNode {
        GraphNode(Node::Add(Box::new(self.0), Box::new(rhs.0)))
    }
}

impl Sub for GraphNode {
    type Output = GraphNode;
    fn sub(self, rhs: GraphNode) -> GraphNode {
        GraphNode(Node::Sub(Box::new(self.0), Box::new(rhs.0)))
    }
}

impl Mul for GraphNode {
    type Output = GraphNode;
    fn mul(self, rhs: GraphNode) -> GraphNode {
        GraphNode(Node::Mul(Box::new(self.0), Box::new(rhs.0)))
    }
}

impl Div for GraphNode {
    type Output = GraphNode;
    fn div(self, rhs: GraphNode) -> GraphNode {
        GraphNode(Node::Div(Box::new(self.0), Box::new(rhs.0)))
    }
}

impl Rem for GraphNode {
    type Output = GraphNode;
    fn rem(self, rhs: GraphNode) -> GraphNode {
        GraphNode(Node::Mod(Box::new(self.0), Box::new(rhs.0)))
    }
}

impl Neg for GraphNode {
    type Output = GraphNode;
    fn neg(self) -> GraphNode {
        GraphNode::constant(0.0) - self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_builds_an_add_node() {
        let sum = GraphNode::constant(1.0) + GraphNode::constant(2.0);
        assert!(matches!(sum.node(), Node::Add(_, _)));
    }

    #[test]
    fn negation_is_zero_minus_self() {
        let negated = -GraphNode::constant(5.0);
        assert!(matches!(negated.node(), Node::Sub(_, _)));
    }

    #[test]
    fn comparison_methods_build_the_matching_node_variant() {
        let gt = GraphNode::constant(1.0).gt(GraphNode::constant(0.0));
        assert!(matches!(gt.node(), Node::Gt(_, _)));
        let not_eq = GraphNode::constant(1.0).not_eq(GraphNode::constant(0.0));
        assert!(matches!(not_eq.node(), Node::Not(_)));
    }
}
