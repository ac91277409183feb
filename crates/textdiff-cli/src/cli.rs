use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use textdiff_types::{CleanupMode, SectionKey};

#[derive(Parser)]
#[command(
    name = "textdiff",
    about = "Aligned, annotated differences between two texts",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two texts side by side
    Compare(CompareArgs),
    /// Print the canonical form of a JSON document
    Canonicalize(CanonicalizeArgs),
    /// Show the effective comparison settings
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Original text file, or `-` for stdin
    pub original: String,
    /// Modified text file, or `-` for stdin
    pub modified: String,
    /// Compare as JSON, ignoring key order and formatting
    #[arg(long)]
    pub json: bool,
    /// Character diff cleanup: semantic, efficiency or none
    #[arg(long)]
    pub cleanup: Option<CleanupMode>,
    /// Edit cost for efficiency cleanup
    #[arg(long)]
    pub edit_cost: Option<usize>,
    /// Unchanged lines shown around each change
    #[arg(short = 'C', long)]
    pub context: Option<usize>,
    /// Expand the collapsed section covering rows START:END
    #[arg(long, value_name = "START:END")]
    pub expand: Vec<SectionKey>,
    /// Expand every collapsed section
    #[arg(long)]
    pub full: bool,
    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CanonicalizeArgs {
    /// JSON file, or `-` for stdin
    pub path: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
