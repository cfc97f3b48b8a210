//! Turns the decoded JSON tree into typed [`Expression`]s.
//!
//! Every node is an object carrying a `kind` discriminator. Fields the
//! builder does not know about (for example `location`) are ignored.

use crate::language::{
    ast::{Expression, FunctionDef, Projection},
    errors::{BuildError, BuildResult},
};
use serde_json::{Map, Value as Json};
use std::collections::HashSet;
use tracing::trace;

type Node = Map<String, Json>;

/// Builds the program held in the root `expression` field of a tree.
pub fn build_program(tree: &Json) -> BuildResult<Expression> {
    match tree.get("expression") {
        Some(Json::Object(node)) if !node.is_empty() => build_node(node),
        _ => Err(BuildError::NoExpression),
    }
}

/// Builds a single expression node and, recursively, all of its children.
pub fn build_expression(node: &Json) -> BuildResult<Expression> {
    match node {
        Json::Object(node) => build_node(node),
        _ => Err(BuildError::malformed("expression", "kind")),
    }
}

fn build_node(node: &Node) -> BuildResult<Expression> {
    let kind = node
        .get("kind")
        .and_then(Json::as_str)
        .ok_or_else(|| BuildError::malformed("expression", "kind"))?;
    trace!(kind, "building node");
    match kind {
        "Str" => build_str(node),
        "Int" => build_int(node),
        "Bool" => build_bool(node),
        "Tuple" => Ok(Expression::Tuple {
            first: child(node, kind, "first")?,
            second: child(node, kind, "second")?,
        }),
        "First" => Ok(Expression::Projection {
            which: Projection::First,
            source: child(node, kind, "value")?,
        }),
        "Second" => Ok(Expression::Projection {
            which: Projection::Second,
            source: child(node, kind, "value")?,
        }),
        "Binary" => {
            let lhs = child(node, kind, "lhs")?;
            let op = text(node, kind, "op")?;
            let rhs = child(node, kind, "rhs")?;
            Ok(Expression::Binary { op, lhs, rhs })
        }
        "Let" => {
            let name = node
                .get("name")
                .and_then(|name| name.get("text"))
                .and_then(Json::as_str)
                .ok_or_else(|| BuildError::malformed(kind, "name"))?;
            Ok(Expression::Let {
                name: name.to_string(),
                value: child(node, kind, "value")?,
                next: child(node, kind, "next")?,
            })
        }
        "Var" => Ok(Expression::Var(text(node, kind, "text")?)),
        "Print" => Ok(Expression::Print(child(node, kind, "value")?)),
        "If" => Ok(Expression::If {
            condition: child(node, kind, "condition")?,
            then_branch: child(node, kind, "then")?,
            else_branch: child(node, kind, "otherwise")?,
        }),
        "Function" => build_function(node),
        "Call" => build_call(node),
        other => Err(BuildError::UnknownNodeKind {
            kind: other.to_string(),
        }),
    }
}

fn child(node: &Node, kind: &str, field: &'static str) -> BuildResult<Box<Expression>> {
    match node.get(field) {
        Some(Json::Object(inner)) => build_node(inner).map(Box::new),
        _ => Err(BuildError::malformed(kind, field)),
    }
}

fn text(node: &Node, kind: &str, field: &'static str) -> BuildResult<String> {
    node.get(field)
        .and_then(Json::as_str)
        .map(str::to_string)
        .ok_or_else(|| BuildError::malformed(kind, field))
}

fn literal<'a>(node: &'a Node, kind: &str) -> BuildResult<&'a Json> {
    node.get("value")
        .ok_or_else(|| BuildError::malformed(kind, "value"))
}

fn malformed_literal(kind: &str, value: &Json) -> BuildError {
    let value = match value {
        Json::String(text) => text.clone(),
        other => other.to_string(),
    };
    BuildError::MalformedLiteral {
        kind: kind.to_string(),
        value,
    }
}

fn build_str(node: &Node) -> BuildResult<Expression> {
    match literal(node, "Str")? {
        Json::String(text) => Ok(Expression::Str(text.clone())),
        other => Err(malformed_literal("Str", other)),
    }
}

fn build_int(node: &Node) -> BuildResult<Expression> {
    let value = literal(node, "Int")?;
    let parsed = match value {
        Json::Number(number) => number.as_i64().and_then(|v| i32::try_from(v).ok()),
        Json::String(text) => text.parse::<i32>().ok(),
        _ => None,
    };
    parsed
        .map(Expression::Int)
        .ok_or_else(|| malformed_literal("Int", value))
}

fn build_bool(node: &Node) -> BuildResult<Expression> {
    let value = literal(node, "Bool")?;
    match value {
        Json::Bool(flag) => Ok(Expression::Bool(*flag)),
        Json::String(text) if text == "true" => Ok(Expression::Bool(true)),
        Json::String(text) if text == "false" => Ok(Expression::Bool(false)),
        other => Err(malformed_literal("Bool", other)),
    }
}

fn build_function(node: &Node) -> BuildResult<Expression> {
    let entries = node
        .get("parameters")
        .and_then(Json::as_array)
        .ok_or_else(|| BuildError::malformed("Function", "parameters"))?;
    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry
            .get("text")
            .and_then(Json::as_str)
            .ok_or_else(|| BuildError::malformed("Function", "parameters"))?;
        if !seen.insert(name) {
            return Err(BuildError::DuplicateParameter {
                name: name.to_string(),
            });
        }
        params.push(name.to_string());
    }
    let body = child(node, "Function", "value")?;
    Ok(Expression::Function(FunctionDef::new(params, *body)))
}

fn build_call(node: &Node) -> BuildResult<Expression> {
    let callee = child(node, "Call", "callee")?;
    let arguments = node
        .get("arguments")
        .and_then(Json::as_array)
        .ok_or_else(|| BuildError::malformed("Call", "arguments"))?
        .iter()
        .map(|argument| match argument {
            Json::Object(inner) => build_node(inner),
            _ => Err(BuildError::malformed("Call", "arguments")),
        })
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(Expression::Call { callee, arguments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn int(value: i32) -> Json {
        json!({ "kind": "Int", "value": value })
    }

    #[test]
    fn builds_literals_from_numbers_and_strings() {
        assert_eq!(build_expression(&int(42)), Ok(Expression::Int(42)));
        assert_eq!(
            build_expression(&json!({ "kind": "Int", "value": "-17" })),
            Ok(Expression::Int(-17))
        );
        assert_eq!(
            build_expression(&json!({ "kind": "Bool", "value": false })),
            Ok(Expression::Bool(false))
        );
        assert_eq!(
            build_expression(&json!({ "kind": "Bool", "value": "true" })),
            Ok(Expression::Bool(true))
        );
        assert_eq!(
            build_expression(&json!({ "kind": "Str", "value": "hello, world" })),
            Ok(Expression::Str("hello, world".into()))
        );
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(
            build_expression(&json!({ "kind": "Int", "value": "12a" })),
            Err(BuildError::MalformedLiteral {
                kind: "Int".into(),
                value: "12a".into()
            })
        );
        assert_eq!(
            build_expression(&json!({ "kind": "Int", "value": 4_294_967_296u64 })),
            Err(BuildError::MalformedLiteral {
                kind: "Int".into(),
                value: "4294967296".into()
            })
        );
        assert!(matches!(
            build_expression(&json!({ "kind": "Bool", "value": "yes" })),
            Err(BuildError::MalformedLiteral { .. })
        ));
        assert_eq!(
            build_expression(&json!({ "kind": "Str" })),
            Err(BuildError::malformed("Str", "value"))
        );
    }

    #[test]
    fn builds_nested_let_with_location_noise() {
        let tree = json!({
            "kind": "Let",
            "name": { "text": "x", "location": { "start": 0, "end": 1, "filename": "a.rinha" } },
            "value": int(1),
            "next": {
                "kind": "Binary",
                "lhs": { "kind": "Var", "text": "x" },
                "op": "Add",
                "rhs": int(2),
                "location": { "start": 4, "end": 9, "filename": "a.rinha" }
            }
        });
        let expected = Expression::Let {
            name: "x".into(),
            value: Box::new(Expression::Int(1)),
            next: Box::new(Expression::Binary {
                op: "Add".into(),
                lhs: Box::new(Expression::Var("x".into())),
                rhs: Box::new(Expression::Int(2)),
            }),
        };
        assert_eq!(build_expression(&tree), Ok(expected));
    }

    #[test]
    fn builds_functions_and_calls() {
        let tree = json!({
            "kind": "Call",
            "callee": {
                "kind": "Function",
                "parameters": [{ "text": "a" }, { "text": "b" }],
                "value": { "kind": "Var", "text": "b" }
            },
            "arguments": [int(1), int(2)]
        });
        let expected = Expression::Call {
            callee: Box::new(Expression::Function(FunctionDef::new(
                vec!["a".into(), "b".into()],
                Expression::Var("b".into()),
            ))),
            arguments: vec![Expression::Int(1), Expression::Int(2)],
        };
        assert_eq!(build_expression(&tree), Ok(expected));
    }

    #[test]
    fn rejects_duplicate_parameters() {
        let tree = json!({
            "kind": "Function",
            "parameters": [{ "text": "a" }, { "text": "a" }],
            "value": int(0)
        });
        assert_eq!(
            build_expression(&tree),
            Err(BuildError::DuplicateParameter { name: "a".into() })
        );
    }

    #[test]
    fn reports_missing_children_by_kind_and_field() {
        let tree = json!({ "kind": "If", "condition": { "kind": "Bool", "value": true }, "then": int(1) });
        assert_eq!(
            build_expression(&tree),
            Err(BuildError::malformed("If", "otherwise"))
        );
        let tree = json!({ "kind": "Tuple", "first": int(1), "second": 2 });
        assert_eq!(
            build_expression(&tree),
            Err(BuildError::malformed("Tuple", "second"))
        );
        let tree = json!({ "kind": "Call", "callee": { "kind": "Var", "text": "f" }, "arguments": [3] });
        assert_eq!(
            build_expression(&tree),
            Err(BuildError::malformed("Call", "arguments"))
        );
    }

    #[test]
    fn errors_inside_children_propagate() {
        let tree = json!({
            "kind": "Print",
            "value": { "kind": "Second", "value": { "kind": "Loop" } }
        });
        assert_eq!(
            build_expression(&tree),
            Err(BuildError::UnknownNodeKind {
                kind: "Loop".into()
            })
        );
    }

    #[test]
    fn program_requires_non_empty_expression() {
        assert_eq!(
            build_program(&json!({ "name": "empty.rinha" })),
            Err(BuildError::NoExpression)
        );
        assert_eq!(
            build_program(&json!({ "expression": {} })),
            Err(BuildError::NoExpression)
        );
        assert_eq!(
            build_program(&json!({ "expression": [] })),
            Err(BuildError::NoExpression)
        );
        assert_eq!(
            build_program(&json!({ "expression": { "kind": "Print", "value": int(1) } })),
            Ok(Expression::Print(Box::new(Expression::Int(1))))
        );
    }
}
