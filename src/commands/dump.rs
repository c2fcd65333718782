use crate::analyzers::{self, ast_dump};
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let source = io::read_file(path)?;
    let tree = analyzers::parse(&source)?;

    let stdout = std::io::stdout();
    ast_dump::write_tree(&mut stdout.lock(), tree.root_node(), &source)?;
    Ok(())
}
