// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod core;
pub mod errors;
pub mod io;

// Re-export commonly used types
pub use crate::core::{AnalysisReport, Diagnostic, DiagnosticKind, FunctionSignature};

pub use crate::analyzers::{
    eval::{evaluate, is_constant_true, EvaluationEnvironment},
    functions::collect_functions,
    memory::analyze_memory,
    parse,
    returns::collect_return_values,
};

pub use crate::errors::MemlintError;
pub use crate::io::output::OutputFormat;
