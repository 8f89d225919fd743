//! Defaults and output path resolution shared by all commands

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// Markdown report scanned when no file is given
pub const DEFAULT_INPUT: &str = "ANALYSE_BERICHT.md";

pub const RESULTS_JSON: &str = "URL_ANALYSE_RESULTS.json";
pub const RESULTS_YAML: &str = "URL_ANALYSE_RESULTS.yaml";
pub const ANALYSIS_REPORT: &str = "URL_ANALYSE_REPORT.md";
pub const CSV_EXPORT: &str = "URL_LISTE_VOLLSTAENDIG.csv";
pub const MARKDOWN_TABLE: &str = "URL_TABELLE.md";
pub const MENTIONS_REPORT: &str = "ALLE_URLS_MIT_DUPLIKATEN.txt";
pub const LISTING_REPORT: &str = "URL_EXTRACTION_RESULTS.txt";

/// Lines scanned above a URL when looking for its heading
pub const CONTEXT_WINDOW: usize = 20;

/// Length of the frequency ranking on the console
pub const TOP_MENTIONS: usize = 20;

/// Serialization format of the results document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn results_file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => RESULTS_JSON,
            OutputFormat::Yaml => RESULTS_YAML,
        }
    }

    /// Guess from a file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                OutputFormat::Yaml
            }
            _ => OutputFormat::Json,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Output flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory for generated files (created if missing)
    #[arg(short, long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Print only the JSON summary line on stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl OutputArgs {
    pub fn plan(&self) -> OutputPlan {
        OutputPlan::new(&self.out_dir)
    }
}

/// Concrete output locations for one run
#[derive(Debug, Clone)]
pub struct OutputPlan {
    dir: PathBuf,
}

impl OutputPlan {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}
