//! url-census CLI
//!
//! Extracts every URL from a markdown report, classifies it by origin
//! service and writes console, JSON, CSV, markdown and text reports.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use url_census::analyze::{run_analyze, AnalyzeArgs};
use url_census::export::{run_export, ExportArgs};
use url_census::list::{run_list, ListArgs};
use url_census::logging::init_logging;
use url_census::mentions::{run_mentions, MentionsArgs};

#[derive(Parser)]
#[command(name = "url-census")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Extract, classify and report every URL in a markdown report")]
#[command(long_about = "Scans one markdown file, classifies each URL by origin service and category, and writes reports.\n\nCommands:\n  analyze    Unique URLs with context: JSON/YAML results + markdown report\n  export     CSV + markdown table from an analyze results document\n  mentions   Every occurrence incl. duplicates, with frequency ranking\n  list       Sorted unique URLs grouped by type and category")]
struct Cli {
    /// Increase log verbosity (-v, -vv); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify unique URLs and write results document + markdown report
    Analyze(AnalyzeArgs),
    /// Export a results document as CSV and markdown table
    Export(ExportArgs),
    /// Report every URL mention, duplicates included
    Mentions(MentionsArgs),
    /// List unique URLs grouped by type and category
    List(ListArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Export(args) => run_export(args),
        Commands::Mentions(args) => run_mentions(args),
        Commands::List(args) => run_list(args),
    }
}
