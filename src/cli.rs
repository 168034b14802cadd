use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "suggestd")]
#[command(about = "suggestd - ranked prefix suggestions over weighted word lists")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order). Defaults apply if none are given.
    #[arg(long, action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Path to one or more CSV word lists (`word,rank` rows) to index.
    #[arg(long, action = clap::ArgAction::Append)]
    pub words: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Print suggestions for one or more selectors.
    Query {
        /// Prefixes to look up.
        #[arg(required = true)]
        selectors: Vec<String>,

        /// Max suggestions per selector. Overrides `query.limit` in the config.
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Read selectors from stdin, one per line, and print suggestions for each.
    Repl {
        /// Max suggestions per selector. Overrides `query.limit` in the config.
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON lines.
        #[arg(long)]
        json: bool,
    },
}
