use crate::analyzers::{self, returns::collect_return_values};
use crate::io::{self, output};
use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path, function: &str) -> Result<()> {
    let source = io::read_file(path)?;
    let tree = analyzers::parse(&source)?;
    let values = collect_return_values(tree.root_node(), &source, function);

    let stdout = std::io::stdout();
    output::write_return_values(&mut stdout.lock(), &values)
}
