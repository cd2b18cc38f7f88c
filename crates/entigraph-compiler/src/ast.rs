//! Typed, span-carrying AST for the update-function surface grammar.
//!
//! Every `Stmt` and `Expr` carries a [`NodeId`], a dense per-parse index,
//! rather than a back-pointer or arena reference. Analyzer passes (§4.5 of
//! the compiler's pipeline) attach their annotations in side tables keyed by
//! `NodeId` instead of mutating nodes in place — the same information the
//! original design stores as node attributes, just held off to the side,
//! which keeps `Expr`/`Stmt` plain, `Clone`-able data.

/// Dense index assigned to every `Stmt`/`Expr` node during parsing, in
/// pre-order. Stable for the lifetime of one parsed AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Byte-offset span into the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn join(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// The parsed shape of an update function: `def NAME(PARAM) { STMT* }`.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub param: String,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// Names of the fixed, allowed call surface (spec §4.3's arithmetic/trig/
/// random helpers exposed as ordinary calls at the surface-syntax level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFn {
    Abs,
    Floor,
    Ceil,
    Pow,
    Min,
    Max,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Random,
}

impl BuiltinFn {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => BuiltinFn::Abs,
            "floor" => BuiltinFn::Floor,
            "ceil" => BuiltinFn::Ceil,
            "pow" => BuiltinFn::Pow,
            "min" => BuiltinFn::Min,
            "max" => BuiltinFn::Max,
            "sin" => BuiltinFn::Sin,
            "cos" => BuiltinFn::Cos,
            "tan" => BuiltinFn::Tan,
            "asin" => BuiltinFn::Asin,
            "acos" => BuiltinFn::Acos,
            "atan" => BuiltinFn::Atan,
            "random" => BuiltinFn::Random,
            _ => return None,
        })
    }

    /// Number of arguments this builtin expects.
    pub fn arity(self) -> usize {
        match self {
            BuiltinFn::Abs
            | BuiltinFn::Floor
            | BuiltinFn::Ceil
            | BuiltinFn::Sin
            | BuiltinFn::Cos
            | BuiltinFn::Tan
            | BuiltinFn::Asin
            | BuiltinFn::Acos
            | BuiltinFn::Atan => 1,
            BuiltinFn::Pow | BuiltinFn::Min | BuiltinFn::Max | BuiltinFn::Random => 2,
        }
    }
}

/// An assignment/augmented-assignment target: a plain local variable, or an
/// entity's component attribute (`entity.component.attribute`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Name(String),
    Attribute {
        entity: String,
        component: String,
        attribute: String,
    },
}

#[derive(Debug, Clone)]
pub enum Expr {
    Int {
        id: NodeId,
        value: i64,
        span: Span,
    },
    Float {
        id: NodeId,
        value: f64,
        span: Span,
    },
    Bool {
        id: NodeId,
        value: bool,
        span: Span,
    },
    Str {
        id: NodeId,
        value: String,
        span: Span,
    },
    Name {
        id: NodeId,
        name: String,
        span: Span,
    },
    Attribute {
        id: NodeId,
        entity: String,
        component: String,
        attribute: String,
        span: Span,
    },
    Unary {
        id: NodeId,
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        id: NodeId,
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Compare {
        id: NodeId,
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    BoolOp {
        id: NodeId,
        op: BoolOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Not {
        id: NodeId,
        operand: Box<Expr>,
        span: Span,
    },
    /// `then_expr if cond else else_expr` — lowered to `Expr::Switch` by
    /// `transform::ternary` before the AST reaches the lowering pass.
    Ternary {
        id: NodeId,
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        span: Span,
    },
    /// Produced only by `transform::ternary`; never by the parser.
    Switch {
        id: NodeId,
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        span: Span,
    },
    Call {
        id: NodeId,
        func: BuiltinFn,
        args: Vec<Expr>,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Int { id, .. }
            | Expr::Float { id, .. }
            | Expr::Bool { id, .. }
            | Expr::Str { id, .. }
            | Expr::Name { id, .. }
            | Expr::Attribute { id, .. }
            | Expr::Unary { id, .. }
            | Expr::Binary { id, .. }
            | Expr::Compare { id, .. }
            | Expr::BoolOp { id, .. }
            | Expr::Not { id, .. }
            | Expr::Ternary { id, .. }
            | Expr::Switch { id, .. }
            | Expr::Call { id, .. } => *id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Int { span, .. }
            | Expr::Float { span, .. }
            | Expr::Bool { span, .. }
            | Expr::Str { span, .. }
            | Expr::Name { span, .. }
            | Expr::Attribute { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Compare { span, .. }
            | Expr::BoolOp { span, .. }
            | Expr::Not { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Switch { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }

    /// This expression's immediate sub-expressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Int { .. }
            | Expr::Float { .. }
            | Expr::Bool { .. }
            | Expr::Str { .. }
            | Expr::Name { .. }
            | Expr::Attribute { .. } => vec![],
            Expr::Unary { operand, .. } | Expr::Not { operand, .. } => vec![operand],
            Expr::Binary { lhs, rhs, .. }
            | Expr::Compare { lhs, rhs, .. }
            | Expr::BoolOp { lhs, rhs, .. } => vec![lhs, rhs],
            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
                ..
            }
            | Expr::Switch {
                cond,
                then_expr,
                else_expr,
                ..
            } => vec![cond, then_expr, else_expr],
            Expr::Call { args, .. } => args.iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `entity NAME(comp1, comp2, ...);` — binds a local entity handle.
    BindEntity {
        id: NodeId,
        name: String,
        components: Vec<String>,
        span: Span,
    },
    /// A bare string-literal expression statement used as a docstring.
    Docstring {
        id: NodeId,
        text: String,
        span: Span,
    },
    Pass {
        id: NodeId,
        span: Span,
    },
    Assign {
        id: NodeId,
        target: Target,
        value: Expr,
        span: Span,
    },
    AugAssign {
        id: NodeId,
        target: Target,
        op: BinOp,
        value: Expr,
        span: Span,
    },
    If {
        id: NodeId,
        cond: Expr,
        then_body: Vec<Stmt>,
        /// Either the `else { ... }` body, a single recursively-nested
        /// `elif`'s `If` statement, or empty.
        else_body: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::BindEntity { id, .. }
            | Stmt::Docstring { id, .. }
            | Stmt::Pass { id, .. }
            | Stmt::Assign { id, .. }
            | Stmt::AugAssign { id, .. }
            | Stmt::If { id, .. } => *id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Stmt::BindEntity { span, .. }
            | Stmt::Docstring { span, .. }
            | Stmt::Pass { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::AugAssign { span, .. }
            | Stmt::If { span, .. } => *span,
        }
    }
}
