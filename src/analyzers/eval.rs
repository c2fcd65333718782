//! Constant expression evaluation over a restricted arithmetic sublanguage.
//!
//! This is a branch-pruning oracle, not an interpreter: evaluation is total
//! and side-effect-free, and anything it does not understand collapses to 0.
//! Callers must be aware of the bias this introduces (unknown conditions are
//! treated as false).

use super::{node_text, MAX_TRAVERSAL_DEPTH};
use std::collections::HashMap;
use tree_sitter::Node;

/// Read-only identifier bindings consulted when an expression names a
/// variable. Absent identifiers resolve to 0, which is not an error.
pub type EvaluationEnvironment = HashMap<String, i64>;

/// Evaluate a node to an integer. Supported forms: base-10 number literals,
/// identifiers (looked up in `env`), binary `+ - * /`, and parenthesized
/// expressions. Everything else, including division by zero, yields 0.
pub fn evaluate(node: Node, source: &str, env: &EvaluationEnvironment) -> i64 {
    evaluate_at(node, source, env, 0)
}

fn evaluate_at(node: Node, source: &str, env: &EvaluationEnvironment, depth: usize) -> i64 {
    if depth >= MAX_TRAVERSAL_DEPTH {
        return 0;
    }
    match node.kind() {
        "number_literal" => node_text(node, source).parse::<i64>().unwrap_or(0),
        "identifier" => env.get(node_text(node, source)).copied().unwrap_or(0),
        "binary_expression" => {
            let (Some(left), Some(op), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("operator"),
                node.child_by_field_name("right"),
            ) else {
                return 0;
            };
            let lhs = evaluate_at(left, source, env, depth + 1);
            let rhs = evaluate_at(right, source, env, depth + 1);
            // Wrapping/checked arithmetic: evaluation must never fail, not
            // even on overflowing literals or i64::MIN / -1.
            match node_text(op, source) {
                "+" => lhs.wrapping_add(rhs),
                "-" => lhs.wrapping_sub(rhs),
                "*" => lhs.wrapping_mul(rhs),
                "/" => lhs.checked_div(rhs).unwrap_or(0),
                _ => 0,
            }
        }
        // condition_clause is how the grammar wraps an if-condition; both
        // forms unwrap to their inner expression.
        "parenthesized_expression" | "condition_clause" => node
            .named_child(0)
            .map(|inner| evaluate_at(inner, source, env, depth + 1))
            .unwrap_or(0),
        _ => 0,
    }
}

/// A condition is constant-true when it evaluates to a non-zero value.
pub fn is_constant_true(condition: Node, source: &str, env: &EvaluationEnvironment) -> bool {
    evaluate(condition, source, env) != 0
}
