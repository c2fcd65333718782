use crate::analyzers::{self, functions::collect_functions};
use crate::io::{self, output};
use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let source = io::read_file(path)?;
    let tree = analyzers::parse(&source)?;
    let catalog = collect_functions(tree.root_node(), &source);

    let stdout = std::io::stdout();
    output::write_function_table(&mut stdout.lock(), &catalog)
}
