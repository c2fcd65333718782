use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memlint")]
#[command(about = "Heuristic memory-safety and pattern analyzer for C-family sources", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report leaks, double frees, and coarse algorithmic pattern hints
    Analyze {
        /// Source file to analyze
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Print the catalog of declared functions as a table
    Functions {
        /// Source file to analyze
        path: PathBuf,
    },

    /// Resolve the possible return expressions of one function
    Returns {
        /// Source file to analyze
        path: PathBuf,

        /// Name of the function to resolve
        #[arg(short, long)]
        function: String,
    },

    /// Dump the raw syntax tree (debugging aid)
    Dump {
        /// Source file to parse
        path: PathBuf,
    },
}
