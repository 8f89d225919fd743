//! mentions command: Every URL occurrence, duplicates included

use crate::classify::Classifier;
use crate::config::{OutputArgs, DEFAULT_INPUT, MENTIONS_REPORT};
use crate::files::{read_input, write_outputs};
use crate::pipeline::MentionCensus;
use crate::render::{render_mentions, ReportStyle};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MentionsArgs {
    /// Markdown report to scan
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Serialize)]
pub struct MentionsOutput {
    pub input: String,
    pub mentions: usize,
    pub unique_urls: usize,
    pub file: String,
}

pub fn run_mentions(args: MentionsArgs) -> Result<()> {
    let content = read_input(&args.file)?;
    let input = args.file.display().to_string();

    let census = MentionCensus::run(&content, &Classifier::default());
    let report = render_mentions(&census, &input, ReportStyle::File);

    let plan = args.output.plan();
    let path = plan.path(MENTIONS_REPORT);

    if !args.output.quiet {
        print!("{}", render_mentions(&census, &input, ReportStyle::Console));
    }

    write_outputs(plan.dir(), &[(path.clone(), report)])?;

    let output = MentionsOutput {
        input,
        mentions: census.summary.total_mentions,
        unique_urls: census.summary.unique_urls,
        file: path.display().to_string(),
    };
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}
