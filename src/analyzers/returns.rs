//! Best-effort resolution of a function's possible return expressions.
//!
//! `if` conditions are folded with [`eval`] so only the statically live
//! branch is searched. Conditions are always evaluated against an empty
//! environment: there is no value flow from earlier assignments, so a
//! condition naming a variable degrades to the evaluator's default-zero
//! behavior. That is a stated limitation of this pass, not an oversight.

use super::eval::{is_constant_true, EvaluationEnvironment};
use super::{first_identifier, node_text, MAX_TRAVERSAL_DEPTH};
use tree_sitter::Node;

/// Collect the raw source text of every return expression reachable in
/// `target` under constant-folded branching. Result order matches source
/// order of the statements actually reached; an unconditional return
/// short-circuits everything lexically after it in the same block.
pub fn collect_return_values(node: Node, source: &str, target: &str) -> Vec<String> {
    log::debug!("collecting return values for `{target}`");
    collect(node, source, target, false, 0)
}

fn collect(node: Node, source: &str, target: &str, in_function: bool, depth: usize) -> Vec<String> {
    if depth >= MAX_TRAVERSAL_DEPTH {
        return Vec::new();
    }

    match node.kind() {
        "return_statement" if in_function => {
            return match node.named_child(0) {
                Some(value) => vec![node_text(value, source).to_string()],
                // A bare `return;` carries no expression to report.
                None => Vec::new(),
            };
        }
        "if_statement" => {
            let Some(condition) = node.child_by_field_name("condition") else {
                return Vec::new();
            };
            let env = EvaluationEnvironment::new();
            let branch = if is_constant_true(condition, source, &env) {
                node.child_by_field_name("consequence")
            } else {
                node.child_by_field_name("alternative")
            };
            return branch
                .map(|body| collect(body, source, target, in_function, depth + 1))
                .unwrap_or_default();
        }
        "function_definition" => {
            let name = node
                .child_by_field_name("declarator")
                .and_then(|declarator| first_identifier(declarator, source));
            if name.as_deref() == Some(target) {
                let Some(body) = node.child_by_field_name("body") else {
                    return Vec::new();
                };
                let mut values = Vec::new();
                let mut cursor = body.walk();
                for statement in body.children(&mut cursor) {
                    let found = collect(statement, source, target, true, depth + 1);
                    if !found.is_empty() {
                        // An unconditional return dominates the rest of
                        // the block.
                        values.extend(found);
                        break;
                    }
                }
                return values;
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let found = collect(child, source, target, in_function, depth + 1);
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}
