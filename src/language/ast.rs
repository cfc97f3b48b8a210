use std::fmt;
use std::rc::Rc;
use strum::{Display, EnumString, IntoStaticStr};

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Str(String),
    Int(i32),
    Bool(bool),
    Tuple {
        first: Box<Expression>,
        second: Box<Expression>,
    },
    Projection {
        which: Projection,
        source: Box<Expression>,
    },
    Binary {
        op: String,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Let {
        name: String,
        value: Box<Expression>,
        next: Box<Expression>,
    },
    Var(String),
    Print(Box<Expression>),
    If {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    Function(FunctionDef),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// Name of the Tree `kind` this expression was built from.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Str(_) => "Str",
            Expression::Int(_) => "Int",
            Expression::Bool(_) => "Bool",
            Expression::Tuple { .. } => "Tuple",
            Expression::Projection { which, .. } => which.kind(),
            Expression::Binary { .. } => "Binary",
            Expression::Let { .. } => "Let",
            Expression::Var(_) => "Var",
            Expression::Print(_) => "Print",
            Expression::If { .. } => "If",
            Expression::Function(_) => "Function",
            Expression::Call { .. } => "Call",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    First,
    Second,
}

impl Projection {
    pub fn kind(self) -> &'static str {
        match self {
            Projection::First => "First",
            Projection::Second => "Second",
        }
    }
}

/// Function literal. Parameters and body are reference counted so that
/// every closure created from the same literal shares them.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub params: Rc<[String]>,
    pub body: Rc<Expression>,
}

impl FunctionDef {
    pub fn new(params: Vec<String>, body: Expression) -> Self {
        Self {
            params: params.into(),
            body: Rc::new(body),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn ({})", self.params.join(", "))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}
