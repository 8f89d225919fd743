//! analyze command: Classify every unique URL in a markdown report
//!
//! Writes the results document (JSON or YAML) and a markdown report,
//! prints the full analysis to stdout.

use crate::classify::Classifier;
use crate::config::{OutputArgs, OutputFormat, ANALYSIS_REPORT, DEFAULT_INPUT};
use crate::files::{read_input, write_outputs};
use crate::pipeline::Census;
use crate::render::{render_console_analysis, render_markdown_report};
use crate::schema::ResultsDocument;
use anyhow::Result;
use chrono::Local;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Markdown report to scan
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,

    /// Results document format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub input: String,
    pub occurrences: usize,
    pub total_urls: usize,
    pub files: Vec<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let content = read_input(&args.file)?;
    let input = args.file.display().to_string();

    let census = Census::run(&content, &Classifier::default());
    if census.urls.is_empty() {
        warn!(file = %input, "No URLs found");
    }

    let document = ResultsDocument::new(&census.urls, &census.aggregation);
    let results = match args.format {
        OutputFormat::Json => document.to_json()?,
        OutputFormat::Yaml => document.to_yaml()?,
    };
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = render_markdown_report(&census, &input, &generated_at);

    let plan = args.output.plan();
    let outputs = vec![
        (plan.path(args.format.results_file_name()), results),
        (plan.path(ANALYSIS_REPORT), report),
    ];

    if !args.output.quiet {
        print!("{}", render_console_analysis(&census, &input));
    }

    write_outputs(plan.dir(), &outputs)?;

    let output = AnalyzeOutput {
        input,
        occurrences: census.occurrences,
        total_urls: census.urls.len(),
        files: outputs.iter().map(|(p, _)| p.display().to_string()).collect(),
    };
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}
