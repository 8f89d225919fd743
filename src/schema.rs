//! Results document schema
//!
//! Written by `analyze` (JSON or YAML) and read back by `export`.

use crate::aggregate::{Aggregation, Statistics};
use crate::classify::{Category, Classification, UrlType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A unique URL with its classification and heading context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedUrl {
    pub url: String,
    #[serde(rename = "type")]
    pub url_type: UrlType,
    pub category: Category,
    pub domain: String,
    pub description: String,
    /// Nearest heading above the first occurrence, or "Unknown"
    pub context: String,
}

impl ClassifiedUrl {
    pub fn new(url: impl Into<String>, classification: Classification, context: String) -> Self {
        Self {
            url: url.into(),
            url_type: classification.url_type,
            category: classification.category,
            domain: classification.domain,
            description: classification.description,
            context,
        }
    }
}

/// One textual occurrence of a URL, duplicates kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub url: String,
    pub url_type: UrlType,
    pub line_number: usize,
    /// Title of the enclosing `### N. name` heading
    pub repository: String,
    /// Title of the enclosing `## 🏷️` section
    pub section: String,
    pub line_text: String,
}

/// Root structure of URL_ANALYSE_RESULTS.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub total_urls: usize,
    pub statistics: Statistics,
    pub by_type: BTreeMap<String, Vec<String>>,
    pub by_category: BTreeMap<String, Vec<String>>,
    pub all_urls: Vec<ClassifiedUrl>,
}

impl ResultsDocument {
    pub fn new(urls: &[ClassifiedUrl], aggregation: &Aggregation) -> Self {
        Self {
            total_urls: urls.len(),
            statistics: aggregation.statistics.clone(),
            by_type: aggregation
                .by_type
                .iter()
                .map(|(t, bucket)| (t.to_string(), url_list(bucket)))
                .collect(),
            by_category: aggregation
                .by_category
                .iter()
                .map(|(c, bucket)| (c.to_string(), url_list(bucket)))
                .collect(),
            all_urls: urls.to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self).map(|mut s| {
            s.push('\n');
            s
        })
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_yaml(text: &str) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(text)
    }
}

fn url_list(bucket: &[ClassifiedUrl]) -> Vec<String> {
    bucket.iter().map(|u| u.url.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn sample() -> Vec<ClassifiedUrl> {
        vec![
            ClassifiedUrl::new(
                "https://github.com/acme/widget",
                classify("https://github.com/acme/widget"),
                "1. acme/widget".to_string(),
            ),
            ClassifiedUrl::new(
                "https://example.org/ü",
                classify("https://example.org/ü"),
                "Übersicht".to_string(),
            ),
        ]
    }

    #[test]
    fn test_record_field_names() {
        let json = serde_json::to_value(&sample()[0]).unwrap();
        assert_eq!(json["type"], "github-repo");
        assert_eq!(json["category"], "devtools");
        assert_eq!(json["domain"], "github.com");
        assert_eq!(json["context"], "1. acme/widget");
        assert_eq!(json["description"], "GitHub Repository");
    }

    #[test]
    fn test_document_layout() {
        let urls = sample();
        let doc = ResultsDocument::new(&urls, &Aggregation::from_urls(&urls));
        let json = doc.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_urls"], 2);
        assert_eq!(value["statistics"]["github_repos"], 1);
        assert_eq!(value["by_type"]["other"][0], "https://example.org/ü");
        assert_eq!(value["by_category"]["devtools"][0], "https://github.com/acme/widget");
        assert_eq!(value["all_urls"].as_array().unwrap().len(), 2);

        // two-space indent, non-ASCII kept verbatim
        assert!(json.contains("\n  \"total_urls\": 2"));
        assert!(json.contains("Übersicht"));
    }

    #[test]
    fn test_json_and_yaml_read_back() {
        let urls = sample();
        let doc = ResultsDocument::new(&urls, &Aggregation::from_urls(&urls));

        let from_json = ResultsDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(from_json, doc);

        let from_yaml = ResultsDocument::from_yaml(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(from_yaml, doc);
    }
}
