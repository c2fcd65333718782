use crate::core::{Diagnostic, FunctionSignature};
use clap::ValueEnum;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

/// Render diagnostics, one `Warning:` line each for terminal output or a
/// JSON array for machine consumption. Every diagnostic handed in is
/// written; there is no filtering here.
pub fn write_diagnostics<W: Write>(
    writer: &mut W,
    diagnostics: &[Diagnostic],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Terminal => {
            for diagnostic in diagnostics {
                writeln!(writer, "{} {}", "Warning:".yellow().bold(), diagnostic.message)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, diagnostics)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

const TABLE_SEPARATOR: &str = "-------------------------------------------------------------";

/// Fixed-width two-column function table bounded by dash separator lines.
pub fn write_function_table<W: Write>(
    writer: &mut W,
    functions: &[FunctionSignature],
) -> anyhow::Result<()> {
    writeln!(writer, "{TABLE_SEPARATOR}")?;
    writeln!(writer, "{:<30}{:<60}", "Function Name", "Declaration")?;
    writeln!(writer, "{TABLE_SEPARATOR}")?;
    for function in functions {
        writeln!(writer, "{:<30}{:<60}", function.name, function.declaration)?;
    }
    writeln!(writer, "{TABLE_SEPARATOR}")?;
    Ok(())
}

pub fn write_return_values<W: Write>(writer: &mut W, values: &[String]) -> anyhow::Result<()> {
    for value in values {
        writeln!(writer, "Return value: {value}")?;
    }
    Ok(())
}
