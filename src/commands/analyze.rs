use crate::analyzers::{self, memory};
use crate::io::{self, output};
use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path, format: output::OutputFormat) -> Result<()> {
    let source = io::read_file(path)?;
    let tree = analyzers::parse(&source)?;
    let report = memory::analyze_memory(tree.root_node(), &source);

    let stdout = std::io::stdout();
    output::write_diagnostics(&mut stdout.lock(), report.diagnostics(), format)
}
