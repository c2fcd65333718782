use thiserror::Error;

/// Typed failures of the analysis layer. Everything else propagates as
/// `anyhow::Error` with context attached at the call site.
#[derive(Debug, Error)]
pub enum MemlintError {
    #[error("failed to load the C++ grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no syntax tree for {0} bytes of input")]
    Parse(usize),
}
