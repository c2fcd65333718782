//! Indented dump of the raw syntax tree. Debugging aid only; carries no
//! analysis logic.

use super::{node_text, MAX_TRAVERSAL_DEPTH};
use std::io::Write;
use tree_sitter::Node;

pub fn write_tree<W: Write>(writer: &mut W, node: Node, source: &str) -> std::io::Result<()> {
    write_node(writer, node, source, 0)
}

fn write_node<W: Write>(
    writer: &mut W,
    node: Node,
    source: &str,
    depth: usize,
) -> std::io::Result<()> {
    if depth >= MAX_TRAVERSAL_DEPTH {
        return Ok(());
    }
    writeln!(
        writer,
        "{}\\-- {} (`{}`)",
        " ".repeat(depth * 2),
        node.kind(),
        node_text(node, source)
    )?;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        write_node(writer, child, source, depth + 1)?;
    }
    Ok(())
}
