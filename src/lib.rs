pub mod diagnostics;
pub mod language;
pub mod runtime;


use crate::language::{ast::Expression, errors::BuildError};
use crate::runtime::{Environment, Interpreter, Options, RuntimeError, Value};
use miette::Diagnostic;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{} is not a .json tree", path.display())]
    #[diagnostic(
        code(hina::unsupported_file),
        help("pass the JSON syntax tree produced by the parser")
    )]
    UnsupportedFile { path: PathBuf },
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(hina::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON tree")]
    #[diagnostic(code(hina::json))]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Reads and decodes the JSON tree stored at `path`.
pub fn load_tree(path: &Path) -> Result<serde_json::Value, Error> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return Err(Error::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Builds the tree's root expression and evaluates it under a fresh
/// top-level environment, printing to `out`.
pub fn run_tree<W: Write>(
    tree: &serde_json::Value,
    out: W,
    options: Options,
) -> Result<Value, Error> {
    if let Some(name) = tree.get("name").and_then(|name| name.as_str()) {
        debug!(program = name, "building");
    }
    let expression = language::build_program(tree)?;
    run_expression(&expression, out, options)
}

/// Evaluates an already built expression under a fresh top-level
/// environment.
pub fn run_expression<W: Write>(
    expression: &Expression,
    out: W,
    options: Options,
) -> Result<Value, Error> {
    let mut interpreter = Interpreter::new(out, options);
    let result = interpreter.evaluate(expression, &mut Environment::new());
    let flushed = interpreter.flush();
    let value = result?;
    flushed?;
    Ok(value)
}
