use miette::Diagnostic;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("`{kind}` node is badly structured: missing or invalid `{field}`")]
    #[diagnostic(code(hina::build::malformed_node))]
    MalformedNode { kind: String, field: &'static str },
    #[error("`{kind}` literal has an invalid value `{value}`")]
    #[diagnostic(code(hina::build::malformed_literal))]
    MalformedLiteral { kind: String, value: String },
    #[error("parameter `{name}` is declared more than once")]
    #[diagnostic(code(hina::build::duplicate_parameter))]
    DuplicateParameter { name: String },
    #[error("unknown node kind `{kind}`")]
    #[diagnostic(
        code(hina::build::unknown_kind),
        help("expected one of Str, Int, Bool, Tuple, First, Second, Binary, Let, Var, Print, If, Function, Call")
    )]
    UnknownNodeKind { kind: String },
    #[error("tree has no expression")]
    #[diagnostic(
        code(hina::build::no_expression),
        help("the root object needs a non-empty `expression` field")
    )]
    NoExpression,
}

impl BuildError {
    pub fn malformed(kind: impl Into<String>, field: &'static str) -> Self {
        BuildError::MalformedNode {
            kind: kind.into(),
            field,
        }
    }
}
