use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use regintel_ingest::ChunkStrategy;

/// Regulatory document chunking and evidence selection.
///
/// Logs go to stderr; command output goes to stdout.
#[derive(Parser, Debug)]
#[command(name = "regintel", about = "Regulatory document chunking and evidence selection")]
pub struct CliArgs {
    /// Config profile; keys are read as {PROFILE}_{KEY} before {KEY}
    #[arg(long, global = true, env = "REGINTEL_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chunk a file or a folder and print index records as JSON lines
    Chunk {
        /// Document file or folder of documents
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
    },

    /// Select evidence for a query from retrieved candidates
    Select {
        /// The user question
        #[arg(long)]
        query: String,

        /// JSON array of candidates, ordered by ascending distance
        #[arg(long)]
        candidates: PathBuf,

        /// JSON lines of index records (as printed by `chunk`), used to enumerate frameworks
        #[arg(long)]
        corpus: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Citations)]
        format: OutputFormat,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// Route each document by its file name
    Auto,
    /// Fixed-size overlapping windows
    Window,
    /// Sections split at regulatory headings
    Headings,
    /// One section per "Principle N" heading
    Principles,
}

impl StrategyArg {
    /// `None` means route by file name.
    pub fn fixed(self) -> Option<ChunkStrategy> {
        match self {
            StrategyArg::Auto => None,
            StrategyArg::Window => Some(ChunkStrategy::Window),
            StrategyArg::Headings => Some(ChunkStrategy::Headings),
            StrategyArg::Principles => Some(ChunkStrategy::Principles),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bulleted citation list
    Citations,
    /// Numbered evidence block as sent to the generator
    Evidence,
    /// Full selection as JSON
    Json,
}
