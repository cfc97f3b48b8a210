use miette::Diagnostic;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("Type error: {message}")]
    #[diagnostic(code(hina::runtime::type_error))]
    TypeError { message: String },
    #[error("Undefined variable `{name}`")]
    #[diagnostic(code(hina::runtime::undefined_variable))]
    UndefinedVariable { name: String },
    #[error("Value of type {found} is not callable")]
    #[diagnostic(code(hina::runtime::not_callable))]
    NotCallable { found: &'static str },
    #[error("Function expected {expected} arguments but received {received}")]
    #[diagnostic(code(hina::runtime::arity))]
    ArityError { expected: usize, received: usize },
    #[error("Unknown binary operator `{op}`")]
    #[diagnostic(
        code(hina::runtime::unknown_operator),
        help("supported operators: Add, Sub, Mul, Div, Rem, Eq, Neq, Lt, Gt, Lte, Gte, And, Or")
    )]
    UnknownOperator { op: String },
    #[error("Division by zero in `{op}`")]
    #[diagnostic(code(hina::runtime::division_by_zero))]
    DivisionByZero { op: &'static str },
    #[error("Parameter `{name}` is bound more than once in the same call")]
    #[diagnostic(code(hina::runtime::duplicate_parameter))]
    DuplicateParameter { name: String },
    #[error("Call depth exceeded the limit of {limit}")]
    #[diagnostic(
        code(hina::runtime::recursion_limit),
        help("raise or remove the limit with --max-depth")
    )]
    RecursionLimit { limit: usize },
    #[error("Failed to write program output")]
    #[diagnostic(code(hina::runtime::output))]
    Output(#[source] std::io::Error),
}

impl RuntimeError {
    pub fn type_error(message: impl Into<String>) -> Self {
        RuntimeError::TypeError {
            message: message.into(),
        }
    }
}
