pub mod ast_dump;
pub mod eval;
pub mod functions;
pub mod memory;
pub mod returns;

use crate::errors::MemlintError;
use tree_sitter::{Node, Parser, Tree};

/// Depth cap shared by the recursive passes so a pathologically deep tree
/// degrades to a partial result instead of exhausting the call stack.
pub(crate) const MAX_TRAVERSAL_DEPTH: usize = 512;

/// Parse a C-family source buffer into a syntax tree.
pub fn parse(source: &str) -> Result<Tree, MemlintError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_cpp::LANGUAGE.into())?;
    parser
        .parse(source, None)
        .ok_or(MemlintError::Parse(source.len()))
}

/// Source slice covered by a node. Total: a range that is not valid UTF-8
/// yields the empty string rather than an error.
pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// First direct child with the given kind, in source order.
pub(crate) fn find_child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Depth-first search for the first `identifier` node under `node`,
/// returning its text. Declarators nest arbitrarily (pointers, references,
/// parenthesized forms), so a fixed child index would not do.
pub(crate) fn first_identifier(node: Node, source: &str) -> Option<String> {
    first_identifier_at(node, source, 0)
}

fn first_identifier_at(node: Node, source: &str, depth: usize) -> Option<String> {
    if depth >= MAX_TRAVERSAL_DEPTH {
        return None;
    }
    if node.kind() == "identifier" {
        return Some(node_text(node, source).to_string());
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find_map(|child| first_identifier_at(child, source, depth + 1));
    found
}

#[cfg(test)]
pub(crate) fn parse_cpp(source: &str) -> Tree {
    parse(source).expect("failed to parse test source")
}
