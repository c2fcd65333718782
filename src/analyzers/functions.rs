//! Function catalog builder.
//!
//! Collects `(name, declaration text)` pairs from function definitions,
//! standalone function declarations, and in-class method declarations.
//! Insertion order is preserved and exact duplicates are dropped, so two
//! template instantiations with different declaration text stay distinct.

use super::{first_identifier, node_text, MAX_TRAVERSAL_DEPTH};
use crate::core::FunctionSignature;
use tree_sitter::Node;

pub fn collect_functions(root: Node, source: &str) -> Vec<FunctionSignature> {
    let mut catalog = Vec::new();
    walk(root, source, &mut catalog, 0);
    log::debug!("function catalog holds {} entries", catalog.len());
    catalog
}

fn walk(node: Node, source: &str, catalog: &mut Vec<FunctionSignature>, depth: usize) {
    if depth >= MAX_TRAVERSAL_DEPTH {
        return;
    }
    match node.kind() {
        "field_declaration" => visit_field_declaration(node, source, catalog),
        "function_definition" | "function_declaration" => visit_function(node, source, catalog),
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, catalog, depth + 1);
    }
}

/// In-class method declarations surface as field declarations shaped
/// "primitive type, then function declarator". Anything else is skipped.
fn visit_field_declaration(node: Node, source: &str, catalog: &mut Vec<FunctionSignature>) {
    if node.child_count() <= 2 {
        return;
    }
    let (Some(return_type), Some(declarator)) = (node.child(0), node.child(1)) else {
        return;
    };
    if return_type.kind() != "primitive_type" || declarator.kind() != "function_declarator" {
        return;
    }
    let Some(name_node) = declarator.child(0) else {
        return;
    };
    push_unique(
        catalog,
        node_text(name_node, source).to_string(),
        node_text(node, source).to_string(),
    );
}

fn visit_function(node: Node, source: &str, catalog: &mut Vec<FunctionSignature>) {
    let mut name = first_identifier(node, source).unwrap_or_default();
    let mut declaration = String::new();

    if node.kind() == "function_definition" {
        let Some(head) = node.child(0) else {
            return;
        };
        if head.kind() == "function_declarator" {
            // Declarator-only definition: a constructor or destructor with
            // no return type. Destructors carry their name in a dedicated
            // child rather than a plain identifier.
            if let Some(first) = head.child(0) {
                if first.kind() == "destructor_name" {
                    name = node_text(first, source).to_string();
                }
            }
            declaration = format!("{};", node_text(head, source));
        } else {
            let Some(declarator) = node.child(1) else {
                return;
            };
            if declarator.kind() == "function_declarator" && declarator.child_count() > 1 {
                if let Some(first) = declarator.child(0) {
                    if first.kind() == "field_identifier" {
                        name = node_text(first, source).to_string();
                    }
                }
            }
            // Span from the start of the return type through the end of the
            // declarator, regardless of what sits between them.
            let span = source
                .get(head.start_byte()..declarator.end_byte())
                .unwrap_or_default();
            declaration = format!("{span};");
        }
    }

    push_unique(catalog, name, declaration);
}

fn push_unique(catalog: &mut Vec<FunctionSignature>, name: String, declaration: String) {
    let already_present = catalog
        .iter()
        .any(|entry| entry.name == name && entry.declaration == declaration);
    if !already_present {
        catalog.push(FunctionSignature { name, declaration });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parse_cpp;

    fn catalog_of(source: &str) -> Vec<FunctionSignature> {
        let tree = parse_cpp(source);
        collect_functions(tree.root_node(), source)
    }

    #[test]
    fn definition_yields_name_and_declaration_text() {
        let catalog = catalog_of("int add(int a, int b) { return a + b; }");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].name, "add");
        assert_eq!(catalog[0].declaration, "int add(int a, int b);");
    }

    #[test]
    fn identical_definitions_are_deduplicated() {
        let source = "int f() { return 1; }\nint f() { return 1; }";
        let catalog = catalog_of(source);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn distinct_declaration_text_stays_separate() {
        let source = "int f(int a) { return a; }\nint f(double a) { return 0; }";
        let catalog = catalog_of(source);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.iter().all(|entry| entry.name == "f"));
    }

    #[test]
    fn collection_is_idempotent_and_order_stable() {
        let source = "int one() { return 1; }\nint two() { return 2; }";
        let tree = parse_cpp(source);
        let first = collect_functions(tree.root_node(), source);
        let second = collect_functions(tree.root_node(), source);
        assert_eq!(first, second);
        assert_eq!(first[0].name, "one");
        assert_eq!(first[1].name, "two");
    }

    #[test]
    fn in_class_method_declaration_is_collected() {
        let source = "class Box { int area(); };";
        let catalog = catalog_of(source);
        assert!(catalog
            .iter()
            .any(|entry| entry.name == "area" && entry.declaration.contains("int area()")));
    }

    #[test]
    fn destructor_name_comes_from_the_destructor_child() {
        let source = "struct Box { ~Box() { } };";
        let catalog = catalog_of(source);
        assert!(catalog.iter().any(|entry| entry.name == "~Box"));
    }

    #[test]
    fn out_of_line_method_definition_is_collected() {
        let source = "struct Box { int area(); };\nint Box::area() { return 4; }";
        let catalog = catalog_of(source);
        assert!(catalog
            .iter()
            .any(|entry| entry.declaration == "int Box::area();"));
    }

    #[test]
    fn non_function_declarations_are_ignored() {
        let catalog = catalog_of("int x = 3;\nstatic const char* s = \"hi\";");
        assert!(catalog.is_empty());
    }
}
