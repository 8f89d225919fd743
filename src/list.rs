//! list command: Sorted unique URLs grouped by type and category

use crate::classify::Classifier;
use crate::config::{OutputArgs, DEFAULT_INPUT, LISTING_REPORT};
use crate::files::{read_input, write_outputs};
use crate::pipeline::Census;
use crate::render::{render_listing, ReportStyle};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Markdown report to scan
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub input: String,
    pub total_urls: usize,
    pub file: String,
}

pub fn run_list(args: ListArgs) -> Result<()> {
    let content = read_input(&args.file)?;
    let input = args.file.display().to_string();

    let census = Census::run(&content, &Classifier::default());
    let report = render_listing(&census, &input, ReportStyle::File);

    let plan = args.output.plan();
    let path = plan.path(LISTING_REPORT);

    if !args.output.quiet {
        print!("{}", render_listing(&census, &input, ReportStyle::Console));
    }

    write_outputs(plan.dir(), &[(path.clone(), report)])?;

    let output = ListOutput {
        input,
        total_urls: census.urls.len(),
        file: path.display().to_string(),
    };
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}
