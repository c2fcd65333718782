//! Allocation/deallocation tracking over one syntax tree.
//!
//! Identity is textual: two occurrences of the same identifier text are the
//! same pointer, with no scope or alias tracking. The walk is a single
//! iterative depth-first pass in source order, so diagnostic order is
//! deterministic for a given input.

use super::{find_child_of_kind, first_identifier, node_text};
use crate::core::{AnalysisReport, DiagnosticKind};
use std::collections::HashMap;
use tree_sitter::Node;

/// Call names treated as acquiring heap or mapped memory, next to the
/// `new`-expression form.
const ALLOC_FUNCTIONS: &[&str] = &["malloc", "calloc", "realloc", "VirtualAlloc", "mmap", "new"];

/// Call names treated as releasing memory, next to the `delete`-expression
/// form.
const DEALLOC_FUNCTIONS: &[&str] = &["free", "VirtualFree", "munmap", "delete"];

#[derive(Default)]
struct PointerRecord {
    allocations: u32,
    deallocations: u32,
    allocator: Option<String>,
    freed: bool,
}

enum DeallocSite {
    FreeCall,
    DeleteExpression,
}

#[derive(Default)]
struct MemoryTracker {
    records: HashMap<String, PointerRecord>,
    // First-sighting order of each map, so end-of-walk diagnostics come out
    // in a stable order.
    record_order: Vec<String>,
    declarators: HashMap<String, u32>,
    declarator_order: Vec<String>,
    uses_table: bool,
    report: AnalysisReport,
}

/// Walk the tree rooted at `root` and report leaks, double frees,
/// frees of unallocated pointers, and the coarse greedy/DP pattern hints.
pub fn analyze_memory(root: Node, source: &str) -> AnalysisReport {
    let mut tracker = MemoryTracker::default();

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "init_declarator" => tracker.visit_init_declarator(node, source),
            "assignment_expression" => tracker.visit_assignment(node, source),
            "delete_expression" => tracker.visit_delete(node, source),
            "call_expression" => tracker.visit_call(node, source),
            "function_declarator" => tracker.visit_function_declarator(node, source),
            "subscript_expression" => tracker.uses_table = true,
            _ => {}
        }
        // Reverse push keeps pop order equal to source order.
        for index in (0..node.child_count()).rev() {
            if let Some(child) = node.child(index) {
                stack.push(child);
            }
        }
    }

    tracker.finish()
}

impl MemoryTracker {
    fn record_mut(&mut self, name: &str) -> &mut PointerRecord {
        if !self.records.contains_key(name) {
            self.record_order.push(name.to_string());
        }
        self.records.entry(name.to_string()).or_default()
    }

    // Once an identifier has been freed it stays marked freed, even across
    // a later re-allocation. Textual identity carries no flow sensitivity,
    // so a second free of the same name is always reported.
    fn record_allocation(&mut self, name: &str, allocator: &str) {
        let record = self.record_mut(name);
        record.allocations += 1;
        record.allocator = Some(allocator.to_string());
    }

    fn record_deallocation(&mut self, name: &str, site: DeallocSite) {
        let record = self.record_mut(name);
        record.deallocations += 1;
        if record.freed {
            let message = match site {
                DeallocSite::FreeCall => {
                    format!("Use-after-free detected: `{name}` freed again after an earlier free")
                }
                DeallocSite::DeleteExpression => {
                    format!("Use-after-free detected: attempt to delete already freed pointer `{name}`")
                }
            };
            // The identifier stays marked freed.
            self.report.push(DiagnosticKind::DoubleFreeOrUaf, message);
        } else if record.allocations == 0 {
            match site {
                DeallocSite::FreeCall => self.report.push(
                    DiagnosticKind::FreeOfUnallocated,
                    format!("Deallocating unallocated pointer: `{name}`"),
                ),
                DeallocSite::DeleteExpression => self.report.push(
                    DiagnosticKind::DeleteOfUnallocated,
                    format!("Deleting a pointer that was never allocated: `{name}`"),
                ),
            }
        } else {
            record.freed = true;
        }
    }

    /// `T* p = malloc(..)`, `T* p = new T` and friends.
    fn visit_init_declarator(&mut self, node: Node, source: &str) {
        let Some(declarator) = node.child_by_field_name("declarator") else {
            return;
        };
        let Some(name) = first_identifier(declarator, source) else {
            return;
        };
        let Some(value) = node.child_by_field_name("value") else {
            return;
        };
        match value.kind() {
            "call_expression" => {
                if let Some(allocator) = allocating_callee(value, source) {
                    self.record_allocation(&name, allocator);
                }
            }
            "new_expression" => self.record_allocation(&name, "new"),
            _ => {}
        }
    }

    /// `p = malloc(..)` and `p = new T` after declaration.
    fn visit_assignment(&mut self, node: Node, source: &str) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        if left.kind() != "identifier" {
            return;
        }
        let name = node_text(left, source);
        match right.kind() {
            "call_expression" => {
                if let Some(allocator) = allocating_callee(right, source) {
                    self.record_allocation(name, allocator);
                }
            }
            "new_expression" => self.record_allocation(name, "new"),
            _ => {}
        }
    }

    fn visit_delete(&mut self, node: Node, source: &str) {
        let mut cursor = node.walk();
        let operand = node.children(&mut cursor).find(|child| {
            matches!(
                child.kind(),
                "identifier" | "field_expression" | "subscript_expression"
            )
        });
        if let Some(operand) = operand {
            let name = node_text(operand, source).to_string();
            self.record_deallocation(&name, DeallocSite::DeleteExpression);
        }
    }

    fn visit_call(&mut self, node: Node, source: &str) {
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };
        let callee_name = node_text(callee, source);
        if DEALLOC_FUNCTIONS.contains(&callee_name) {
            if let Some(argument) =
                find_child_of_kind(node, "argument_list").and_then(|args| args.named_child(0))
            {
                let name = node_text(argument, source).to_string();
                self.record_deallocation(&name, DeallocSite::FreeCall);
            }
        }
        if callee_name.contains("sort") {
            self.report.push(
                DiagnosticKind::PossibleGreedyPattern,
                "Possible greedy approach detected: sorting call found. Consider a dynamic \
                 programming formulation if optimality matters.",
            );
        }
    }

    /// Declarator sightings are counted file-globally, keyed on the full
    /// declarator text. Two sightings (say a declaration plus a definition)
    /// combined with any table indexing in the file trigger the DP hint.
    fn visit_function_declarator(&mut self, node: Node, source: &str) {
        let text = node_text(node, source).to_string();
        if !self.declarators.contains_key(&text) {
            self.declarator_order.push(text.clone());
        }
        *self.declarators.entry(text).or_insert(0) += 1;
    }

    fn finish(mut self) -> AnalysisReport {
        for name in &self.record_order {
            let record = &self.records[name];
            if record.allocations > record.deallocations {
                let allocator = record.allocator.as_deref().unwrap_or("unknown");
                self.report.push(
                    DiagnosticKind::Leak,
                    format!(
                        "Potential memory leak: `{name}` allocated {} time(s) via {allocator} \
                         with only {} matching deallocation(s)",
                        record.allocations, record.deallocations
                    ),
                );
            }
        }

        if self.uses_table {
            for declarator in &self.declarator_order {
                if self.declarators[declarator] > 1 {
                    self.report.push(
                        DiagnosticKind::PossibleDpPattern,
                        format!(
                            "Possible dynamic programming pattern: function `{declarator}` \
                             declared more than once combined with table indexing"
                        ),
                    );
                }
            }
        }

        log::debug!("memory pass finished with {} diagnostic(s)", self.report.len());
        self.report
    }
}

fn allocating_callee<'a>(call: Node, source: &'a str) -> Option<&'a str> {
    let callee = call.child_by_field_name("function")?;
    let name = node_text(callee, source);
    ALLOC_FUNCTIONS.contains(&name).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parse_cpp;
    use crate::core::Diagnostic;

    fn diagnostics_of(source: &str) -> Vec<Diagnostic> {
        let tree = parse_cpp(source);
        analyze_memory(tree.root_node(), source).diagnostics().to_vec()
    }

    fn kinds_of(source: &str) -> Vec<DiagnosticKind> {
        diagnostics_of(source).iter().map(|d| d.kind).collect()
    }

    #[test]
    fn balanced_malloc_free_is_clean() {
        let source = "void f() { int* p = malloc(10); free(p); }";
        assert!(kinds_of(source).is_empty());
    }

    #[test]
    fn unfreed_malloc_leaks() {
        let source = "void f() { int* p = malloc(10); }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Leak);
        assert!(diagnostics[0].message.contains("`p`"));
        assert!(diagnostics[0].message.contains("malloc"));
    }

    #[test]
    fn double_free_reports_exactly_once_and_no_leak() {
        let source = "void f() { int* p = malloc(10); free(p); free(p); }";
        let diagnostics = diagnostics_of(source);
        let uaf: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::DoubleFreeOrUaf)
            .collect();
        assert_eq!(uaf.len(), 1);
        assert!(uaf[0].message.contains("`p`"));
        assert!(!diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Leak && d.message.contains("`p`")));
    }

    #[test]
    fn free_of_unallocated_pointer() {
        let source = "void f(int* q) { free(q); }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::FreeOfUnallocated);
        assert!(!diagnostics.iter().any(|d| d.kind == DiagnosticKind::Leak));
    }

    #[test]
    fn delete_of_unallocated_pointer() {
        let source = "void f(int* q) { delete q; }";
        assert_eq!(kinds_of(source), vec![DiagnosticKind::DeleteOfUnallocated]);
    }

    #[test]
    fn new_then_double_delete() {
        let source = "void f() { int* p = new int; delete p; delete p; }";
        assert_eq!(kinds_of(source), vec![DiagnosticKind::DoubleFreeOrUaf]);
    }

    #[test]
    fn assignment_allocation_is_tracked() {
        let source = "void f() { int* p; p = malloc(8); }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Leak);
    }

    #[test]
    fn assignment_of_new_is_tracked() {
        let source = "void f() { int* p; p = new int; delete p; }";
        assert!(kinds_of(source).is_empty());
    }

    #[test]
    fn free_after_reallocation_still_reports_use_after_free() {
        let source = "void f() { int* p = malloc(4); free(p); p = malloc(4); free(p); }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::DoubleFreeOrUaf);
        assert!(diagnostics[0].message.contains("`p`"));
        assert!(!diagnostics.iter().any(|d| d.kind == DiagnosticKind::Leak));
    }

    #[test]
    fn reallocation_without_free_still_counts_as_one_leaked_identifier() {
        let source = "void f() { int* p = malloc(4); p = malloc(8); free(p); }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Leak);
        assert!(diagnostics[0].message.contains("allocated 2 time(s)"));
    }

    #[test]
    fn sort_call_raises_greedy_hint() {
        let source = "void f(int* a) { qsort(a, 10, 4, 0); }";
        assert_eq!(kinds_of(source), vec![DiagnosticKind::PossibleGreedyPattern]);
    }

    #[test]
    fn repeated_declarator_with_table_raises_dp_hint() {
        let source = "int fib(int n);\nint fib(int n) { int t[10]; return t[n]; }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::PossibleDpPattern);
        assert!(diagnostics[0].message.contains("fib(int n)"));
    }

    #[test]
    fn repeated_declarator_without_table_stays_silent() {
        let source = "int twice(int n);\nint twice(int n) { return n + n; }";
        assert!(kinds_of(source).is_empty());
    }

    #[test]
    fn mmap_and_munmap_pair_up() {
        let source = "void f() { void* m = mmap(0, 4096, 0, 0, -1, 0); munmap(m, 4096); }";
        assert!(kinds_of(source).is_empty());
    }

    #[test]
    fn diagnostics_are_ordered_by_source_position() {
        let source = "void f() { free(a); free(b); }";
        let diagnostics = diagnostics_of(source);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("`a`"));
        assert!(diagnostics[1].message.contains("`b`"));
    }
}
