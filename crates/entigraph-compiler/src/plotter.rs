//! The lowering pass: walks the transformed AST once, building up
//! `entigraph_core::Node` expressions through the [`shim`] wrappers and
//! finally assembling a [`entigraph_core::Graph`].
//!
//! This is a direct AST interpreter, not a tracing VM: there is no bytecode
//! and no re-execution step. Each statement is executed exactly once against
//! a `Plotter`, and `entity`/local-variable reads and writes build `Node`
//! expressions instead of touching real values.

use indexmap::{IndexMap, IndexSet};

use entigraph_core::{AttributeRef, ComponentDef, Graph, Input, Node, Output};

use crate::analyze::activity::ActivityTable;
use crate::ast::{BinOp, BoolOp, BuiltinFn, CompareOp, Expr, FunctionDef, Stmt, Target, UnaryOp};
use crate::shim::{GraphEntity, GraphNode};
use crate::{CompileError, Result};

#[derive(Clone)]
pub struct Plotter<'a> {
    catalog: &'a IndexMap<String, ComponentDef>,
    next_entity_id: u64,
    entities: IndexMap<String, GraphEntity>,
    locals: IndexMap<String, GraphNode>,
    /// Every attribute retrieved during tracing, in first-read order,
    /// shared across every entity/component instead of kept per-component
    /// — a component read partway through one entity's turn and a
    /// component read on a different entity right after still land in a
    /// single ordered view, matching a source whose reads interleave
    /// across entities.
    inputs: IndexSet<AttributeRef>,
}

impl<'a> Plotter<'a> {
    pub fn new(catalog: &'a IndexMap<String, ComponentDef>) -> Self {
        Self {
            catalog,
            next_entity_id: 0,
            entities: IndexMap::new(),
            locals: IndexMap::new(),
            inputs: IndexSet::new(),
        }
    }

    /// Runs the transformed function body once, then assembles the `Graph`
    /// of everything it read and wrote.
    pub fn run(&mut self, func: &FunctionDef, activity: &ActivityTable) -> Result<Graph> {
        self.exec_block(&func.body, activity)?;
        self.build_graph()
    }

    fn exec_block(&mut self, stmts: &[Stmt], activity: &ActivityTable) -> Result<()> {
        for stmt in stmts {
            self.exec_stmt(stmt, activity)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt, activity: &ActivityTable) -> Result<()> {
        match stmt {
            Stmt::BindEntity { name, components, .. } => {
                self.bind_entity(name, components)?;
                Ok(())
            }
            Stmt::Docstring { .. } | Stmt::Pass { .. } => Ok(()),
            Stmt::Assign { target, value, .. } => {
                let v = self.eval_expr(value)?;
                self.assign(target, v)
            }
            Stmt::AugAssign { .. } => unreachable!("desugared by preprocess::augassign"),
            Stmt::If { id, cond, then_body, else_body, .. } => {
                self.exec_if(*id, cond, then_body, else_body, activity)
            }
        }
    }

    fn bind_entity(&mut self, name: &str, components: &[String]) -> Result<()> {
        let entity_id = self.next_entity_id;
        self.next_entity_id += 1;
        let entity = GraphEntity::new(entity_id, components, self.catalog)?;
        self.entities.insert(name.to_string(), entity);
        Ok(())
    }

    fn assign(&mut self, target: &Target, value: GraphNode) -> Result<()> {
        match target {
            Target::Name(name) => {
                self.locals.insert(name.clone(), value);
            }
            Target::Attribute { entity, component, attribute } => {
                self.entity_mut(entity)?.component(component)?.set(attribute, value)?;
            }
        }
        Ok(())
    }

    fn entity_mut(&mut self, name: &str) -> Result<&mut GraphEntity> {
        self.entities
            .get_mut(name)
            .ok_or_else(|| CompileError::Shim(crate::ShimError::UnknownEntity { name: name.to_string() }))
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<GraphNode> {
        use entigraph_core::value::{wrap_bool, wrap_f64, wrap_int, wrap_str};

        Ok(match expr {
            Expr::Int { value, .. } => GraphNode(Node::Const(wrap_int(*value))),
            Expr::Float { value, .. } => GraphNode(Node::Const(wrap_f64(*value))),
            Expr::Bool { value, .. } => GraphNode(Node::Const(wrap_bool(*value))),
            Expr::Str { value, .. } => GraphNode(Node::Const(wrap_str(value.clone()))),
            Expr::Name { name, .. } => self.locals.get(name).cloned().ok_or_else(|| {
                CompileError::UnsupportedInput {
                    message: format!("use of undefined local variable '{name}'"),
                }
            })?,
            Expr::Attribute { entity, component, attribute, .. } => {
                let entity = self.entities.get_mut(entity).ok_or_else(|| {
                    CompileError::Shim(crate::ShimError::UnknownEntity { name: entity.clone() })
                })?;
                entity.component(component)?.get(attribute, &mut self.inputs)?
            }
            Expr::Unary { op, operand, .. } => {
                let v = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Neg => -v,
                    UnaryOp::Pos => v,
                }
            }
            Expr::Not { operand, .. } => self.eval_expr(operand)?.not(),
            Expr::Binary { op, lhs, rhs, .. } => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Mod => l % r,
                }
            }
            Expr::Compare { op, lhs, rhs, .. } => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                match op {
                    CompareOp::Eq => l.eq_(r),
                    CompareOp::NotEq => l.not_eq(r),
                    CompareOp::Lt => l.lt(r),
                    CompareOp::Gt => l.gt(r),
                    CompareOp::Le => l.le(r),
                    CompareOp::Ge => l.ge(r),
                }
            }
            Expr::BoolOp { op, lhs, rhs, .. } => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                match op {
                    BoolOp::And => l.and(r),
                    BoolOp::Or => l.or(r),
                }
            }
            Expr::Switch { cond, then_expr, else_expr, .. } => {
                let c = self.eval_expr(cond)?;
                let t = self.eval_expr(then_expr)?;
                let e = self.eval_expr(else_expr)?;
                GraphNode::switch(c, t, e)
            }
            Expr::Ternary { .. } => {
                unreachable!("rewritten to Expr::Switch by transform::ternary")
            }
            Expr::Call { func, args, .. } => self.eval_call(*func, args)?,
        })
    }

    fn eval_call(&mut self, func: BuiltinFn, args: &[Expr]) -> Result<GraphNode> {
        let mut evaluated = Vec::with_capacity(args.len());
        for a in args {
            evaluated.push(self.eval_expr(a)?);
        }
        let mut it = evaluated.into_iter();
        let a0 = it.next().expect("arity checked by the parser");
        Ok(match func {
            BuiltinFn::Abs => a0.abs(),
            BuiltinFn::Floor => a0.floor(),
            BuiltinFn::Ceil => a0.ceil(),
            BuiltinFn::Sin => a0.sin(),
            BuiltinFn::Cos => a0.cos(),
            BuiltinFn::Tan => a0.tan(),
            BuiltinFn::Asin => a0.asin(),
            BuiltinFn::Acos => a0.acos(),
            BuiltinFn::Atan => a0.atan(),
            BuiltinFn::Pow => a0.pow(it.next().expect("arity checked by the parser")),
            BuiltinFn::Min => a0.min(it.next().expect("arity checked by the parser")),
            BuiltinFn::Max => a0.max(it.next().expect("arity checked by the parser")),
            BuiltinFn::Random => GraphNode::random(a0, it.next().expect("arity checked by the parser")),
        })
    }

    fn exec_if(
        &mut self,
        id: crate::ast::NodeId,
        cond: &Expr,
        then_body: &[Stmt],
        else_body: &[Stmt],
        activity: &ActivityTable,
    ) -> Result<()> {
        let cond_node = self.eval_expr(cond)?;

        let mut then_p = self.clone();
        then_p.exec_block(then_body, activity)?;
        let mut else_p = self.clone();
        else_p.exec_block(else_body, activity)?;

        // Branches trace against forked clones, so any attribute they read
        // (beyond what `self` had already read before the branch) only
        // exists in their own `inputs` set. Fold those back in, then-branch
        // first, so the merged trace still reflects every read that
        // happened, in as close to source order as a forked trace allows.
        for attr in then_p.inputs.iter().chain(else_p.inputs.iter()) {
            self.inputs.insert(attr.clone());
        }

        let empty: IndexSet<String> = IndexSet::new();
        let out_syms = activity.get(&id).map(|a| &a.output_syms).unwrap_or(&empty);

        for sym in out_syms {
            if let Some((entity_name, component_name, attribute)) = split_attribute_symbol(sym) {
                self.merge_attribute(&mut then_p, &mut else_p, &cond_node, entity_name, component_name, attribute)?;
            } else {
                self.merge_local(&then_p, &else_p, &cond_node, sym);
            }
        }

        Ok(())
    }

    fn merge_local(&mut self, then_p: &Plotter<'a>, else_p: &Plotter<'a>, cond: &GraphNode, sym: &str) {
        let then_val = then_p.locals.get(sym).cloned();
        let else_val = else_p.locals.get(sym).cloned();
        let pre_val = self.locals.get(sym).cloned();
        let merged = match (then_val, else_val) {
            (Some(t), Some(e)) => Some(GraphNode::switch(cond.clone(), t, e)),
            (Some(t), None) => pre_val.map(|p| GraphNode::switch(cond.clone(), t, p)),
            (None, Some(e)) => pre_val.map(|p| GraphNode::switch(cond.clone(), p, e)),
            (None, None) => None,
        };
        if let Some(v) = merged {
            self.locals.insert(sym.to_string(), v);
        }
    }

    fn merge_attribute(
        &mut self,
        then_p: &mut Plotter<'a>,
        else_p: &mut Plotter<'a>,
        cond: &GraphNode,
        entity_name: &str,
        component_name: &str,
        attribute: &str,
    ) -> Result<()> {
        if !self.entities.contains_key(entity_name) {
            // Bound only inside the branch that wrote it: nothing in the
            // outer scope to merge into.
            return Ok(());
        }

        let then_val = written_attribute(then_p, entity_name, component_name, attribute)?;
        let else_val = written_attribute(else_p, entity_name, component_name, attribute)?;

        let merged = match (then_val, else_val) {
            (Some(t), Some(e)) => Some(GraphNode::switch(cond.clone(), t, e)),
            (Some(t), None) => {
                let pre = pre_value(self, entity_name, component_name, attribute)?;
                Some(GraphNode::switch(cond.clone(), t, pre))
            }
            (None, Some(e)) => {
                let pre = pre_value(self, entity_name, component_name, attribute)?;
                Some(GraphNode::switch(cond.clone(), pre, e))
            }
            (None, None) => None,
        };

        if let Some(v) = merged {
            self.entity_mut(entity_name)?.component(component_name)?.set(attribute, v)?;
        }
        Ok(())
    }

    fn build_graph(&self) -> Result<Graph> {
        let inputs = self.inputs.iter().cloned().map(|attr| Input { attr }).collect();

        let mut outputs = Vec::new();
        for entity in self.entities.values() {
            for component in entity.components() {
                for (attribute, node) in component.outputs() {
                    let target = AttributeRef::new(entity.entity_id(), component.name(), attribute);
                    outputs.push(Output { target, to: node.clone() });
                }
            }
        }

        Ok(Graph::new(inputs, outputs)?)
    }
}

/// The value an attribute held before an `if` that merges a conditional
/// write, fetched (and recorded as a read) on the outer, unforked plotter.
fn pre_value(
    plotter: &mut Plotter<'_>,
    entity_name: &str,
    component_name: &str,
    attribute: &str,
) -> Result<GraphNode> {
    let entity = plotter.entities.get_mut(entity_name).ok_or_else(|| {
        CompileError::Shim(crate::ShimError::UnknownEntity { name: entity_name.to_string() })
    })?;
    Ok(entity.component(component_name)?.get(attribute, &mut plotter.inputs)?)
}

fn written_attribute(
    p: &mut Plotter<'_>,
    entity_name: &str,
    component_name: &str,
    attribute: &str,
) -> Result<Option<GraphNode>> {
    let Some(entity) = p.entities.get_mut(entity_name) else {
        return Ok(None);
    };
    let component = entity.component(component_name)?;
    Ok(component
        .outputs()
        .find(|(a, _)| *a == attribute)
        .map(|(_, node)| GraphNode(node.clone())))
}

fn split_attribute_symbol(sym: &str) -> Option<(&str, &str, &str)> {
    let mut parts = sym.splitn(3, '.');
    let entity = parts.next()?;
    let component = parts.next()?;
    let attribute = parts.next()?;
    Some((entity, component, attribute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::activity;
    use crate::parser::parse;
    use entigraph_core::{PrimitiveKind, Type};

    fn catalog() -> IndexMap<String, ComponentDef> {
        let mut schema = IndexMap::new();
        schema.insert("x".to_string(), Type::Primitive(PrimitiveKind::Float64));
        schema.insert("vx".to_string(), Type::Primitive(PrimitiveKind::Float64));
        let mut catalog = IndexMap::new();
        catalog.insert("position".to_string(), ComponentDef::new("position", schema.clone()));
        catalog.insert("velocity".to_string(), ComponentDef::new("velocity", schema));
        catalog
    }

    #[test]
    fn simple_update_produces_one_output_and_its_input() {
        let func = parse(
            r#"def update(self) {
                entity p("position", "velocity");
                p.position.x = p.position.x + p.velocity.vx;
            }"#,
        )
        .unwrap();
        let activity = activity::analyze(&func.body);
        let catalog = catalog();
        let mut plotter = Plotter::new(&catalog);
        let graph = plotter.run(&func, &activity).unwrap();
        assert_eq!(graph.outputs().len(), 1);
        assert_eq!(graph.inputs().len(), 2);
    }

    #[test]
    fn conditional_write_lowers_to_a_switch() {
        let func = parse(
            r#"def update(self) {
                entity p("position", "velocity");
                if p.velocity.vx > 0.0 {
                    p.position.x = p.position.x + 1.0;
                } else {
                    p.position.x = p.position.x - 1.0;
                }
            }"#,
        )
        .unwrap();
        let activity = activity::analyze(&func.body);
        let catalog = catalog();
        let mut plotter = Plotter::new(&catalog);
        let graph = plotter.run(&func, &activity).unwrap();
        let output = &graph.outputs()[0];
        assert!(matches!(output.to, Node::Switch { .. }));
    }

    #[test]
    fn first_read_order_interleaves_across_entities() {
        let mut catalog = catalog();
        let mut clock_schema = IndexMap::new();
        clock_schema.insert("tick_ms".to_string(), Type::Primitive(PrimitiveKind::Int64));
        catalog.insert("clock".to_string(), ComponentDef::new("clock", clock_schema));

        let func = parse(
            r#"def update(self) {
                entity car("position", "velocity");
                entity clk("clock");
                car.position.x = car.velocity.vx + clk.clock.tick_ms + car.position.x;
            }"#,
        )
        .unwrap();
        let activity = activity::analyze(&func.body);
        let mut plotter = Plotter::new(&catalog);
        let graph = plotter.run(&func, &activity).unwrap();

        let order: Vec<(&str, &str)> = graph
            .inputs()
            .iter()
            .map(|i| (i.attr.component.as_str(), i.attr.attribute.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("velocity", "vx"), ("clock", "tick_ms"), ("position", "x")]
        );
    }

    #[test]
    fn self_assignment_produces_no_outputs_but_keeps_the_read_as_an_input() {
        let func = parse(
            r#"def update(self) {
                entity car("position", "velocity");
                car.position.x = car.position.x;
            }"#,
        )
        .unwrap();
        let activity = activity::analyze(&func.body);
        let catalog = catalog();
        let mut plotter = Plotter::new(&catalog);
        let graph = plotter.run(&func, &activity).unwrap();
        assert_eq!(graph.outputs().len(), 0);
        assert_eq!(graph.inputs().len(), 1);
    }

    #[test]
    fn unbound_entity_access_is_reported_as_unknown_entity() {
        let func = parse(
            r#"def update(self) {
                q.position.x = 1.0;
            }"#,
        )
        .unwrap();
        let activity = activity::analyze(&func.body);
        let catalog = catalog();
        let mut plotter = Plotter::new(&catalog);
        let err = plotter.run(&func, &activity).unwrap_err();
        assert!(matches!(err, CompileError::Shim(crate::ShimError::UnknownEntity { .. })));
    }
}
