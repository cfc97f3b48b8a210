use crate::language::ast::{BinaryOp, Expression, Projection};
use crate::runtime::{
    environment::Environment,
    error::{RuntimeError, RuntimeResult},
    stack::ensure_sufficient_stack,
    value::{Closure, Value},
};
use std::io::{self, Write};
use std::str::FromStr;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of nested calls, `None` for unlimited.
    pub max_call_depth: Option<usize>,
}

pub struct Interpreter<W: Write> {
    out: W,
    options: Options,
    depth: usize,
}

/// Evaluates `expr` under `env`, printing to standard output.
pub fn evaluate(expr: &Expression, env: &mut Environment) -> RuntimeResult<Value> {
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock(), Options::default());
    let result = interpreter.evaluate(expr, env);
    let flushed = interpreter.flush();
    let value = result?;
    flushed?;
    Ok(value)
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W, options: Options) -> Self {
        Self {
            out,
            options,
            depth: 0,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn flush(&mut self) -> RuntimeResult<()> {
        self.out.flush().map_err(RuntimeError::Output)
    }

    pub fn evaluate(&mut self, expr: &Expression, env: &mut Environment) -> RuntimeResult<Value> {
        ensure_sufficient_stack(|| self.eval_expression(expr, env))
    }

    fn eval_expression(&mut self, expr: &Expression, env: &mut Environment) -> RuntimeResult<Value> {
        trace!(kind = expr.kind(), depth = self.depth, "eval");
        match expr {
            Expression::Str(value) => Ok(Value::str(value.as_str())),
            Expression::Int(value) => Ok(Value::Int(*value)),
            Expression::Bool(value) => Ok(Value::Bool(*value)),
            Expression::Print(inner) => {
                let value = self.evaluate(inner, env)?;
                writeln!(self.out, "{value}").map_err(RuntimeError::Output)?;
                Ok(value)
            }
            Expression::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate(lhs, env)?;
                let rhs = self.evaluate(rhs, env)?;
                self.eval_binary(op, lhs, rhs)
            }
            Expression::Tuple { first, second } => {
                let first = self.evaluate(first, env)?;
                let second = self.evaluate(second, env)?;
                Ok(Value::tuple(first, second))
            }
            Expression::Projection { which, source } => match self.evaluate(source, env)? {
                Value::Tuple(pair) => Ok(match which {
                    Projection::First => pair.0.clone(),
                    Projection::Second => pair.1.clone(),
                }),
                other => Err(RuntimeError::type_error(format!(
                    "projection requires a Tuple, found {}",
                    other.type_name()
                ))),
            },
            Expression::Let { name, value, next } => {
                let value = self.evaluate(value, env)?;
                trace!(name = name.as_str(), "binding");
                env.set(name, value);
                self.evaluate(next, env)
            }
            Expression::Var(name) => {
                env.get(name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })
            }
            Expression::If {
                condition,
                then_branch,
                else_branch,
            } => match self.evaluate(condition, env)? {
                Value::Bool(true) => self.evaluate(then_branch, env),
                Value::Bool(false) => self.evaluate(else_branch, env),
                other => Err(RuntimeError::type_error(format!(
                    "If condition must be Bool, found {}",
                    other.type_name()
                ))),
            },
            Expression::Function(def) => Ok(Value::Closure(Closure::new(def.clone()))),
            Expression::Call { callee, arguments } => self.eval_call(callee, arguments, env),
        }
    }

    fn eval_call(
        &mut self,
        callee: &Expression,
        arguments: &[Expression],
        env: &mut Environment,
    ) -> RuntimeResult<Value> {
        let closure = match self.evaluate(callee, env)? {
            Value::Closure(closure) => closure,
            other => {
                return Err(RuntimeError::NotCallable {
                    found: other.type_name(),
                });
            }
        };
        if closure.arity() != arguments.len() {
            return Err(RuntimeError::ArityError {
                expected: closure.arity(),
                received: arguments.len(),
            });
        }
        if let Some(limit) = self.options.max_call_depth {
            if self.depth >= limit {
                return Err(RuntimeError::RecursionLimit { limit });
            }
        }

        let mut frame = Environment::new();
        for (param, argument) in closure.params().iter().zip(arguments) {
            let value = self.evaluate(argument, env)?;
            if frame.contains(param) {
                return Err(RuntimeError::DuplicateParameter {
                    name: param.clone(),
                });
            }
            frame.set(param, value);
        }
        frame.inherit(env);

        self.depth += 1;
        debug!(
            function = %closure.def,
            depth = self.depth,
            bindings = frame.len(),
            "call"
        );
        let result = self.evaluate(&closure.def.body, &mut frame);
        self.depth -= 1;
        result
    }

    fn eval_binary(&self, symbol: &str, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
        let op = BinaryOp::from_str(symbol).map_err(|_| RuntimeError::UnknownOperator {
            op: symbol.to_string(),
        })?;
        use BinaryOp::*;
        match op {
            Add => self.eval_add(lhs, rhs),
            Sub => self.eval_integer(op, lhs, rhs, |a, b| Some(a.wrapping_sub(b))),
            Mul => self.eval_integer(op, lhs, rhs, |a, b| Some(a.wrapping_mul(b))),
            Div => self.eval_integer(op, lhs, rhs, |a, b| (b != 0).then(|| a.wrapping_div(b))),
            Rem => self.eval_integer(op, lhs, rhs, |a, b| (b != 0).then(|| a.wrapping_rem(b))),
            Eq => Ok(Value::Bool(lhs == rhs)),
            Neq => Ok(Value::Bool(lhs != rhs)),
            Lt => self.eval_compare(op, lhs, rhs, |a, b| a < b),
            Gt => self.eval_compare(op, lhs, rhs, |a, b| a > b),
            Lte => self.eval_compare(op, lhs, rhs, |a, b| a <= b),
            Gte => self.eval_compare(op, lhs, rhs, |a, b| a >= b),
            And => self.eval_logic(op, lhs, rhs, |a, b| a && b),
            Or => self.eval_logic(op, lhs, rhs, |a, b| a || b),
        }
    }

    fn eval_add(&self, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
        match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
            (lhs @ Value::Str(_), rhs) | (lhs, rhs @ Value::Str(_)) => {
                Ok(Value::str(format!("{lhs}{rhs}")))
            }
            _ => Err(RuntimeError::type_error("Add requires Int and/or Str")),
        }
    }

    /// `None` from `apply` means the right operand was zero.
    fn eval_integer<F>(&self, op: BinaryOp, lhs: Value, rhs: Value, apply: F) -> RuntimeResult<Value>
    where
        F: Fn(i32, i32) -> Option<i32>,
    {
        match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => apply(a, b)
                .map(Value::Int)
                .ok_or(RuntimeError::DivisionByZero { op: op.into() }),
            (lhs, rhs) => Err(operand_mismatch(op, "Int", &lhs, &rhs)),
        }
    }

    fn eval_compare<F>(&self, op: BinaryOp, lhs: Value, rhs: Value, cmp: F) -> RuntimeResult<Value>
    where
        F: Fn(i32, i32) -> bool,
    {
        match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(cmp(a, b))),
            (lhs, rhs) => Err(operand_mismatch(op, "Int", &lhs, &rhs)),
        }
    }

    fn eval_logic<F>(&self, op: BinaryOp, lhs: Value, rhs: Value, apply: F) -> RuntimeResult<Value>
    where
        F: Fn(bool, bool) -> bool,
    {
        match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(apply(a, b))),
            (lhs, rhs) => Err(operand_mismatch(op, "Bool", &lhs, &rhs)),
        }
    }
}

fn operand_mismatch(op: BinaryOp, expected: &str, lhs: &Value, rhs: &Value) -> RuntimeError {
    RuntimeError::type_error(format!(
        "{op} requires {expected} operands, found {} and {}",
        lhs.type_name(),
        rhs.type_name()
    ))
}
