use serde::{Deserialize, Serialize};

/// What a diagnostic is about. `Leak`, `DoubleFreeOrUaf`, `FreeOfUnallocated`
/// and `DeleteOfUnallocated` come from the allocation tracker proper; the two
/// `Possible*` kinds are coarse file-global pattern hints.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Leak,
    DoubleFreeOrUaf,
    FreeOfUnallocated,
    DeleteOfUnallocated,
    PossibleGreedyPattern,
    PossibleDpPattern,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// One entry of the function catalog. The catalog is deduplicated on the
/// full `(name, declaration)` pair, so two template instantiations with
/// different declaration text stay separate entries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub name: String,
    pub declaration: String,
}

/// Append-only, order-preserving diagnostic sink. Nothing is ever filtered
/// or retracted once pushed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            kind,
            message: message.into(),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_preserves_emission_order() {
        let mut report = AnalysisReport::new();
        report.push(DiagnosticKind::Leak, "first");
        report.push(DiagnosticKind::DoubleFreeOrUaf, "second");
        report.push(DiagnosticKind::Leak, "third");

        let messages: Vec<_> = report
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn report_never_deduplicates() {
        let mut report = AnalysisReport::new();
        report.push(DiagnosticKind::Leak, "same");
        report.push(DiagnosticKind::Leak, "same");
        assert_eq!(report.len(), 2);
    }
}
