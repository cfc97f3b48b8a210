use crate::language::ast::FunctionDef;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub enum Value {
    Str(Rc<str>),
    Int(i32),
    Bool(bool),
    Tuple(Rc<(Value, Value)>),
    Closure(Closure),
}

impl Value {
    pub fn str(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn tuple(first: Value, second: Value) -> Self {
        Value::Tuple(Rc::new((first, second)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "Str",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::Tuple(_) => "Tuple",
            Value::Closure(_) => "Closure",
        }
    }
}

/// Structural equality that also requires matching variants, so `Str("1")`
/// never equals `Int(1)`. Closures are equal when their parameters and
/// bodies are.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Closure(a), Value::Closure(b)) => a.def == b.def,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Tuple(pair) => write!(f, "({}, {})", pair.0, pair.1),
            Value::Closure(_) => write!(f, "<#closure>"),
        }
    }
}

/// A function value. No bindings are captured when the closure is created;
/// free variables resolve against the caller's environment at each call.
#[derive(Clone, Debug)]
pub struct Closure {
    pub def: FunctionDef,
}

impl Closure {
    pub fn new(def: FunctionDef) -> Self {
        Self { def }
    }

    pub fn params(&self) -> &[String] {
        &self.def.params
    }

    pub fn arity(&self) -> usize {
        self.def.arity()
    }
}
