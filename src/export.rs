//! export command: CSV and markdown table from a results document

use crate::config::{OutputArgs, OutputFormat, CSV_EXPORT, MARKDOWN_TABLE, RESULTS_JSON};
use crate::error::CensusError;
use crate::files::{read_input, write_outputs};
use crate::render::{render_csv, render_markdown_table};
use crate::schema::ResultsDocument;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Results document written by `analyze` (.json, or .yaml/.yml)
    #[arg(value_name = "RESULTS", default_value = RESULTS_JSON)]
    pub results: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub results: String,
    pub rows: usize,
    pub files: Vec<String>,
}

pub fn run_export(args: ExportArgs) -> Result<()> {
    let document = load_results(&args.results)?;

    let csv = render_csv(&document.all_urls)?;
    let table = render_markdown_table(&document.all_urls);

    let plan = args.output.plan();
    let outputs = vec![(plan.path(CSV_EXPORT), csv), (plan.path(MARKDOWN_TABLE), table)];
    write_outputs(plan.dir(), &outputs)?;

    if !args.output.quiet {
        println!("✅ CSV erstellt: {}", outputs[0].0.display());
        println!("✅ Markdown-Tabelle erstellt: {}", outputs[1].0.display());
    }

    let output = ExportOutput {
        results: args.results.display().to_string(),
        rows: document.all_urls.len(),
        files: outputs.iter().map(|(p, _)| p.display().to_string()).collect(),
    };
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

/// Read a results document, picking the parser from the extension
pub fn load_results(path: &Path) -> Result<ResultsDocument, CensusError> {
    let text = read_input(path)?;
    let parsed = match OutputFormat::from_path(path) {
        OutputFormat::Json => ResultsDocument::from_json(&text).map_err(|e| e.to_string()),
        OutputFormat::Yaml => ResultsDocument::from_yaml(&text).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| CensusError::ParseResults {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_results_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_results(&path).unwrap_err();
        assert!(matches!(err, CensusError::ParseResults { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_results_yaml_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.yml");
        fs::write(
            &path,
            "total_urls: 0\nstatistics:\n  github_repos: 0\n  github_assets: 0\n  lovable_projects: 0\n  supabase_databases: 0\n  badges: 0\n  discord_servers: 0\n  package_registries: 0\n  documentation_sites: 0\n  infrastructure_tools: 0\nby_type: {}\nby_category: {}\nall_urls: []\n",
        )
        .unwrap();

        let doc = load_results(&path).unwrap();
        assert_eq!(doc.total_urls, 0);
        assert!(doc.all_urls.is_empty());
    }
}
