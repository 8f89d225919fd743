//! Grouping, counting and frequency ranking of classified URLs

use crate::classify::{Category, UrlType};
use crate::schema::{ClassifiedUrl, Mention};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Named counters for the summary blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub github_repos: usize,
    pub github_assets: usize,
    pub lovable_projects: usize,
    pub supabase_databases: usize,
    pub badges: usize,
    pub discord_servers: usize,
    pub package_registries: usize,
    pub documentation_sites: usize,
    /// Counted by category, not type
    pub infrastructure_tools: usize,
}

impl Statistics {
    fn record(&mut self, url: &ClassifiedUrl) {
        let counter = match url.url_type {
            UrlType::GithubRepo => Some(&mut self.github_repos),
            UrlType::GithubAsset => Some(&mut self.github_assets),
            UrlType::Lovable => Some(&mut self.lovable_projects),
            UrlType::Supabase => Some(&mut self.supabase_databases),
            UrlType::Badge => Some(&mut self.badges),
            UrlType::Discord => Some(&mut self.discord_servers),
            UrlType::Registry => Some(&mut self.package_registries),
            UrlType::Documentation => Some(&mut self.documentation_sites),
            _ => None,
        };
        if let Some(counter) = counter {
            *counter += 1;
        }

        if url.category == Category::Infrastructure {
            self.infrastructure_tools += 1;
        }
    }
}

/// Type and category buckets over unique URLs
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Members in first-seen order
    pub by_type: BTreeMap<UrlType, Vec<ClassifiedUrl>>,
    pub by_category: BTreeMap<Category, Vec<ClassifiedUrl>>,
    pub statistics: Statistics,
}

impl Aggregation {
    pub fn from_urls(urls: &[ClassifiedUrl]) -> Self {
        let mut aggregation = Self::default();

        for url in urls {
            aggregation
                .by_type
                .entry(url.url_type)
                .or_default()
                .push(url.clone());
            aggregation
                .by_category
                .entry(url.category)
                .or_default()
                .push(url.clone());
            aggregation.statistics.record(url);
        }

        aggregation
    }

    /// Types with member counts, largest first, ties by name
    pub fn types_by_size(&self) -> Vec<(UrlType, usize)> {
        by_size(&self.by_type)
    }

    /// Categories with member counts, largest first, ties by name
    pub fn categories_by_size(&self) -> Vec<(Category, usize)> {
        by_size(&self.by_category)
    }
}

fn by_size<K: Copy>(buckets: &BTreeMap<K, Vec<ClassifiedUrl>>) -> Vec<(K, usize)> {
    let mut sizes: Vec<(K, usize)> = buckets.iter().map(|(k, v)| (*k, v.len())).collect();
    // stable: BTreeMap order breaks ties
    sizes.sort_by(|a, b| b.1.cmp(&a.1));
    sizes
}

/// Occurrence count per URL, first-seen order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_urls<'a, I>(urls: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();
        for url in urls {
            table.add(url);
        }
        table
    }

    pub fn add(&mut self, url: &str) {
        match self.index.get(url) {
            Some(&idx) => self.entries[idx].1 += 1,
            None => {
                self.index.insert(url.to_string(), self.entries.len());
                self.entries.push((url.to_string(), 1));
            }
        }
    }

    pub fn count(&self, url: &str) -> usize {
        self.index.get(url).map_or(0, |&idx| self.entries[idx].1)
    }

    /// Number of distinct URLs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full ranking: descending count, ties in first-seen order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(url, count)| (url.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// At most `n` entries of [`ranked`](Self::ranked)
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Mentions of one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionGroup {
    pub url_type: UrlType,
    /// Document order
    pub mentions: Vec<Mention>,
    pub unique_urls: usize,
}

/// Per-type grouping of all mentions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionSummary {
    /// Most mentions first, ties in first-seen order
    pub groups: Vec<MentionGroup>,
    pub total_mentions: usize,
    pub unique_urls: usize,
}

impl MentionSummary {
    pub fn from_mentions(mentions: &[Mention]) -> Self {
        let mut groups: Vec<MentionGroup> = Vec::new();

        for mention in mentions {
            match groups.iter_mut().find(|g| g.url_type == mention.url_type) {
                Some(group) => group.mentions.push(mention.clone()),
                None => groups.push(MentionGroup {
                    url_type: mention.url_type,
                    mentions: vec![mention.clone()],
                    unique_urls: 0,
                }),
            }
        }

        for group in &mut groups {
            group.unique_urls = distinct(group.mentions.iter());
        }
        groups.sort_by(|a, b| b.mentions.len().cmp(&a.mentions.len()));

        Self {
            groups,
            total_mentions: mentions.len(),
            unique_urls: distinct(mentions.iter()),
        }
    }
}

fn distinct<'a>(mentions: impl Iterator<Item = &'a Mention>) -> usize {
    mentions.map(|m| m.url.as_str()).collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn classified(url: &str) -> ClassifiedUrl {
        ClassifiedUrl::new(url, classify(url), "Unknown".to_string())
    }

    fn mention(url: &str, line_number: usize) -> Mention {
        Mention {
            url: url.to_string(),
            url_type: classify(url).url_type,
            line_number,
            repository: "Unknown".to_string(),
            section: "Unknown".to_string(),
            line_text: url.to_string(),
        }
    }

    #[test]
    fn test_buckets_and_statistics() {
        let urls: Vec<_> = [
            "https://github.com/a/b",
            "https://github.com/c/d",
            "https://github.com/user-attachments/assets/1",
            "https://abc.supabase.co",
            "https://hub.docker.com/r/x",
            "https://img.shields.io/badge/x",
            "https://example.org",
        ]
        .into_iter()
        .map(classified)
        .collect();

        let agg = Aggregation::from_urls(&urls);
        assert_eq!(agg.by_type[&UrlType::GithubRepo].len(), 2);
        assert_eq!(agg.by_category[&Category::Infrastructure].len(), 2);

        let stats = &agg.statistics;
        assert_eq!(stats.github_repos, 2);
        assert_eq!(stats.github_assets, 1);
        assert_eq!(stats.supabase_databases, 1);
        assert_eq!(stats.package_registries, 1);
        assert_eq!(stats.badges, 1);
        assert_eq!(stats.infrastructure_tools, 2);
        assert_eq!(stats.discord_servers, 0);

        // each URL lands in exactly one type and one category bucket
        let typed: usize = agg.by_type.values().map(Vec::len).sum();
        let categorized: usize = agg.by_category.values().map(Vec::len).sum();
        assert_eq!(typed, urls.len());
        assert_eq!(categorized, urls.len());
    }

    #[test]
    fn test_types_by_size() {
        let urls: Vec<_> = [
            "https://example.org/1",
            "https://github.com/a/b",
            "https://github.com/c/d",
            "https://discord.gg/x",
        ]
        .into_iter()
        .map(classified)
        .collect();

        let sizes = Aggregation::from_urls(&urls).types_by_size();
        assert_eq!(
            sizes,
            vec![
                (UrlType::GithubRepo, 2),
                (UrlType::Discord, 1),
                (UrlType::Other, 1),
            ]
        );
    }

    #[test]
    fn test_frequency_top_ties_first_seen() {
        let table = FrequencyTable::from_urls([
            "https://b.io",
            "https://a.io",
            "https://c.io",
            "https://a.io",
            "https://c.io",
            "https://a.io",
        ]);

        assert_eq!(table.count("https://a.io"), 3);
        assert_eq!(table.count("https://missing.io"), 0);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.ranked(),
            vec![("https://a.io", 3), ("https://c.io", 2), ("https://b.io", 1)]
        );
        assert_eq!(table.top(1), vec![("https://a.io", 3)]);
    }

    #[test]
    fn test_frequency_top_caps_at_n() {
        let urls: Vec<String> = (0..30).map(|i| format!("https://h{i}.io")).collect();
        let table = FrequencyTable::from_urls(urls.iter().map(String::as_str));
        let top = table.top(20);
        assert_eq!(top.len(), 20);
        assert_eq!(top[0].0, "https://h0.io");
        assert_eq!(top[19].0, "https://h19.io");
    }

    #[test]
    fn test_mention_summary() {
        let mentions = vec![
            mention("https://example.org", 1),
            mention("https://github.com/a/b", 2),
            mention("https://github.com/a/b", 5),
            mention("https://github.com/c/d", 9),
        ];

        let summary = MentionSummary::from_mentions(&mentions);
        assert_eq!(summary.total_mentions, 4);
        assert_eq!(summary.unique_urls, 3);

        let github = &summary.groups[0];
        assert_eq!(github.url_type, UrlType::GithubRepo);
        assert_eq!(github.mentions.len(), 3);
        assert_eq!(github.unique_urls, 2);
        assert_eq!(summary.groups[1].url_type, UrlType::Other);
    }
}
