//! Extraction → classification → aggregation, one value per stage

use crate::aggregate::{Aggregation, FrequencyTable, MentionSummary};
use crate::classify::Classifier;
use crate::context::{locate_heading, SectionTracker};
use crate::extract::{dedupe_urls, extract_raw_matches, extract_urls, TrimPolicy};
use crate::schema::{ClassifiedUrl, Mention};
use std::time::Instant;
use tracing::{debug, info};

/// Deduplicating run: each unique URL classified once
#[derive(Debug, Clone)]
pub struct Census {
    /// Occurrences before dedup
    pub occurrences: usize,
    /// Unique URLs in first-seen order
    pub urls: Vec<ClassifiedUrl>,
    pub aggregation: Aggregation,
}

impl Census {
    pub fn run(text: &str, classifier: &Classifier<'_>) -> Self {
        let start = Instant::now();

        let all = extract_urls(text, TrimPolicy::Run);
        let occurrences = all.len();
        let unique = dedupe_urls(all);
        debug!(action = "extract", occurrences, unique = unique.len(), "Extracted URLs");

        let lines: Vec<&str> = text.lines().collect();
        let urls: Vec<ClassifiedUrl> = unique
            .into_iter()
            .map(|url| {
                let context = locate_heading(&lines, &url);
                let classification = classifier.classify(&url);
                ClassifiedUrl::new(url, classification, context)
            })
            .collect();

        let aggregation = Aggregation::from_urls(&urls);
        info!(
            action = "complete",
            component = "census",
            occurrences,
            unique = urls.len(),
            types = aggregation.by_type.len(),
            duration_ms = start.elapsed().as_millis(),
            "Classified URLs"
        );

        Self {
            occurrences,
            urls,
            aggregation,
        }
    }

    /// Unique URLs sorted lexicographically
    pub fn sorted_urls(&self) -> Vec<&ClassifiedUrl> {
        let mut sorted: Vec<&ClassifiedUrl> = self.urls.iter().collect();
        sorted.sort_by(|a, b| a.url.cmp(&b.url));
        sorted
    }
}

/// Duplicate-preserving run: every occurrence kept with its line
#[derive(Debug, Clone)]
pub struct MentionCensus {
    /// Document order
    pub mentions: Vec<Mention>,
    pub frequency: FrequencyTable,
    pub summary: MentionSummary,
}

impl MentionCensus {
    pub fn run(text: &str, classifier: &Classifier<'_>) -> Self {
        let start = Instant::now();
        let mut raw = extract_raw_matches(text, TrimPolicy::Run).into_iter().peekable();
        let mut tracker = SectionTracker::new();
        let mut mentions = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            tracker.observe(line);

            while let Some(m) = raw.next_if(|m| m.line_number == idx + 1) {
                let url_type = classifier.classify(&m.url).url_type;
                mentions.push(Mention {
                    url: m.url,
                    url_type,
                    line_number: m.line_number,
                    repository: tracker.repository().to_string(),
                    section: tracker.section().to_string(),
                    line_text: m.line_text.trim().to_string(),
                });
            }
        }

        let frequency = FrequencyTable::from_urls(mentions.iter().map(|m| m.url.as_str()));
        let summary = MentionSummary::from_mentions(&mentions);
        info!(
            action = "complete",
            component = "mention_census",
            mentions = mentions.len(),
            unique = frequency.len(),
            duration_ms = start.elapsed().as_millis(),
            "Collected URL mentions"
        );

        Self {
            mentions,
            frequency,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Category, UrlType};

    const DOC: &str = "\
# Bericht

## 🏷️ Entwicklung

### 1. acme/widget
See [repo](https://github.com/acme/widget).
![screenshot](https://github.com/user-attachments/assets/abc123)

### 2. other/thing
Docs at https://example.org/page and https://github.com/acme/widget
again https://github.com/acme/widget
";

    #[test]
    fn test_census_dedups_and_classifies() {
        let census = Census::run(DOC, &Classifier::default());
        assert_eq!(census.occurrences, 5);
        assert_eq!(census.urls.len(), 3);

        let repo = &census.urls[0];
        assert_eq!(repo.url, "https://github.com/acme/widget");
        assert_eq!(repo.url_type, UrlType::GithubRepo);
        assert_eq!(repo.category, Category::Devtools);
        assert_eq!(repo.context, "1. acme/widget");

        let asset = &census.urls[1];
        assert_eq!(asset.url_type, UrlType::GithubAsset);
        assert_eq!(asset.category, Category::Creative);

        let other = &census.urls[2];
        assert_eq!(other.url_type, UrlType::Other);
        assert_eq!(other.description, "");
        assert_eq!(other.context, "2. other/thing");

        assert_eq!(census.aggregation.statistics.github_repos, 1);
    }

    #[test]
    fn test_sorted_urls() {
        let census = Census::run(DOC, &Classifier::default());
        let sorted: Vec<&str> = census.sorted_urls().iter().map(|u| u.url.as_str()).collect();
        assert_eq!(
            sorted,
            vec![
                "https://example.org/page",
                "https://github.com/acme/widget",
                "https://github.com/user-attachments/assets/abc123",
            ]
        );
    }

    #[test]
    fn test_mentions_keep_every_occurrence() {
        let census = MentionCensus::run(DOC, &Classifier::default());
        assert_eq!(census.mentions.len(), 5);
        assert_eq!(census.frequency.count("https://github.com/acme/widget"), 3);

        let lines: Vec<usize> = census
            .mentions
            .iter()
            .filter(|m| m.url == "https://github.com/acme/widget")
            .map(|m| m.line_number)
            .collect();
        assert_eq!(lines, vec![6, 10, 11]);

        let first = &census.mentions[0];
        assert_eq!(first.repository, "acme/widget");
        assert_eq!(first.section, "Entwicklung");
        assert_eq!(first.line_text, "See [repo](https://github.com/acme/widget).");

        assert_eq!(census.mentions[4].repository, "other/thing");
    }

    #[test]
    fn test_heading_line_urls_belong_to_that_heading() {
        let doc = "### 1. old/repo\n## 🏷️ Tools\n### 2. acme/x https://github.com/acme/x\n";
        let census = MentionCensus::run(doc, &Classifier::default());

        assert_eq!(census.mentions.len(), 1);
        let mention = &census.mentions[0];
        assert_eq!(mention.repository, "acme/x");
        assert_eq!(mention.section, "Tools");
        assert_eq!(mention.line_number, 3);
    }

    #[test]
    fn test_empty_input() {
        let census = Census::run("", &Classifier::default());
        assert!(census.urls.is_empty());
        assert_eq!(census.aggregation.statistics, Default::default());

        let mentions = MentionCensus::run("no links", &Classifier::default());
        assert!(mentions.mentions.is_empty());
        assert!(mentions.frequency.is_empty());
    }
}
