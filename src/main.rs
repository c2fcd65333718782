use anyhow::Result;
use clap::Parser;
use memlint::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { path, format } => memlint::commands::analyze::run(&path, format),
        Commands::Functions { path } => memlint::commands::functions::run(&path),
        Commands::Returns { path, function } => memlint::commands::returns::run(&path, &function),
        Commands::Dump { path } => memlint::commands::dump::run(&path),
    }
}
