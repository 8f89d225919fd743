//! url-census: URL extraction and classification for markdown reports
//!
//! Pipeline: extract → (dedup) → context → classify → aggregate → render
//!
//! Commands:
//! - analyze: unique URLs, JSON/YAML results + markdown report
//! - export: CSV + markdown table from a results document
//! - mentions: every occurrence, frequency ranking
//! - list: sorted unique URLs grouped by type and category

pub mod aggregate;
pub mod analyze;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod extract;
pub mod files;
pub mod list;
pub mod logging;
pub mod mentions;
pub mod pipeline;
pub mod render;
pub mod schema;

pub use aggregate::{Aggregation, FrequencyTable, MentionSummary, Statistics};
pub use classify::{classify, repo_name, Category, Classification, Classifier, UrlType};
pub use error::CensusError;
pub use extract::{extract_raw_matches, extract_unique_urls, extract_urls, RawMatch, TrimPolicy};
pub use pipeline::{Census, MentionCensus};
pub use schema::{ClassifiedUrl, Mention, ResultsDocument};
