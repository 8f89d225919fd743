//! URL extraction from markdown and text content

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// `http://` or `https://` followed by anything up to whitespace, a closing
/// bracket, an angle bracket or a quote.
pub const URL_PATTERN: &str = r#"https?://[^\s\)\]<>"']+"#;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is valid"));

/// Characters trimmed from the end of a raw match
const TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\'', '"', ']'];

/// How trailing punctuation is removed from a raw match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimPolicy {
    /// Strip the whole trailing run (`foo).,` -> `foo`)
    #[default]
    Run,
    /// Strip at most one trailing character
    Once,
}

impl TrimPolicy {
    pub fn trim<'a>(&self, url: &'a str) -> &'a str {
        match self {
            TrimPolicy::Run => url.trim_end_matches(TRAILING),
            TrimPolicy::Once => url.strip_suffix(TRAILING).unwrap_or(url),
        }
    }
}

/// One textual occurrence of a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub url: String,
    /// 1-based
    pub line_number: usize,
    pub line_text: String,
}

/// Lazily yield every trimmed URL occurrence in document order.
///
/// A match that trims down to the bare scheme (`https://.`) is yielded as
/// `https://`, which is the one output that does not re-match the pattern.
pub fn find_urls(text: &str, policy: TrimPolicy) -> impl Iterator<Item = &str> + '_ {
    URL_RE.find_iter(text).map(move |m| policy.trim(m.as_str()))
}

/// Extract every URL occurrence, duplicates included
pub fn extract_urls(text: &str, policy: TrimPolicy) -> Vec<String> {
    find_urls(text, policy).map(str::to_string).collect()
}

/// Exact-string dedup, first occurrence wins
pub fn dedupe_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for url in urls {
        let url = url.into();
        if seen.insert(url.clone()) {
            unique.push(url);
        }
    }

    unique
}

/// Extract unique URLs from text content
pub fn extract_unique_urls(text: &str) -> Vec<String> {
    dedupe_urls(find_urls(text, TrimPolicy::Run))
}

/// Extract every occurrence together with its line number and line text
pub fn extract_raw_matches(text: &str, policy: TrimPolicy) -> Vec<RawMatch> {
    text.lines()
        .enumerate()
        .flat_map(|(idx, line)| {
            find_urls(line, policy).map(move |url| RawMatch {
                url: url.to_string(),
                line_number: idx + 1,
                line_text: line.to_string(),
            })
        })
        .collect()
}

/// The part of `line` before its first URL, or all of it
pub fn text_before_url(line: &str) -> &str {
    URL_RE.find(line).map_or(line, |m| &line[..m.start()])
}

/// True if `candidate` is matched by the URL pattern as a whole
pub fn is_whole_match(candidate: &str) -> bool {
    URL_RE
        .find(candidate)
        .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_urls() {
        let content = r#"
            Check out https://example.com and
            [link](https://foo.bar/path?q=1) for more.
            Also http://old.site.org.
        "#;

        let urls = extract_urls(content, TrimPolicy::Run);
        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://foo.bar/path?q=1",
                "http://old.site.org",
            ]
        );
    }

    #[test]
    fn test_markdown_link_with_trailing_period() {
        let urls = extract_urls(
            "See [repo](https://github.com/acme/widget).",
            TrimPolicy::Run,
        );
        assert_eq!(urls, vec!["https://github.com/acme/widget"]);
    }

    #[test]
    fn test_trim_policies() {
        assert_eq!(TrimPolicy::Run.trim("https://a.io/x!?."), "https://a.io/x");
        assert_eq!(TrimPolicy::Once.trim("https://a.io/x!?."), "https://a.io/x!?");
        assert_eq!(TrimPolicy::Once.trim("https://a.io/x"), "https://a.io/x");
    }

    #[test]
    fn test_literal_trailing_period_is_lost() {
        let urls = extract_urls("https://example.com/file.", TrimPolicy::Run);
        assert_eq!(urls, vec!["https://example.com/file"]);
    }

    #[test]
    fn test_extract_urls_keeps_duplicates() {
        let content = "https://dup.com https://dup.com https://dup.com";
        assert_eq!(extract_urls(content, TrimPolicy::Run).len(), 3);
    }

    #[test]
    fn test_extract_unique_urls_dedup() {
        let content = "https://b.com https://a.com https://b.com https://a.com";
        assert_eq!(extract_unique_urls(content), vec!["https://b.com", "https://a.com"]);
    }

    #[test]
    fn test_quotes_and_angle_brackets_stop_match() {
        let content = r#"<a href="https://quoted.io/x">x</a> <https://angle.io>"#;
        assert_eq!(
            extract_urls(content, TrimPolicy::Run),
            vec!["https://quoted.io/x", "https://angle.io"]
        );
    }

    #[test]
    fn test_raw_matches_carry_line_numbers() {
        let content =
            "# Title\nhttps://x.io/a\n\nsee https://x.io/a and https://y.io\nhttps://x.io/a\n";
        let matches = extract_raw_matches(content, TrimPolicy::Run);

        let lines: Vec<usize> = matches
            .iter()
            .filter(|m| m.url == "https://x.io/a")
            .map(|m| m.line_number)
            .collect();
        assert_eq!(lines, vec![2, 4, 5]);
        assert_eq!(matches[1].line_text, "see https://x.io/a and https://y.io");
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn test_is_whole_match() {
        assert!(is_whole_match("https://github.com/acme/widget"));
        assert!(!is_whole_match("see https://github.com"));
        assert!(!is_whole_match("https://x.io/a b"));
    }

    #[test]
    fn test_bare_scheme_is_still_emitted() {
        let urls = extract_urls("see https://. end", TrimPolicy::Run);
        assert_eq!(urls, vec!["https://"]);
        assert!(!is_whole_match(&urls[0]));
    }

    #[test]
    fn test_text_before_url() {
        assert_eq!(text_before_url("2. acme/x https://github.com/acme/x"), "2. acme/x ");
        assert_eq!(text_before_url("no links"), "no links");
    }

    proptest! {
        #[test]
        fn prop_every_occurrence_extracted(
            hosts in prop::collection::vec("[a-z]{1,8}\\.(com|org|io)", 1..8),
            filler in "[A-Za-z ]{0,12}",
        ) {
            let text: String = hosts
                .iter()
                .map(|h| format!("{filler} https://{h}/p "))
                .collect();

            let all = extract_urls(&text, TrimPolicy::Run);
            prop_assert_eq!(all.len(), hosts.len());

            let unique = extract_unique_urls(&text);
            let expected: HashSet<_> = hosts.iter().collect();
            prop_assert_eq!(unique.len(), expected.len());
        }

        // host is always present, so the bare-scheme case cannot occur here
        #[test]
        fn prop_extracted_urls_rematch_themselves(
            path in "[a-zA-Z0-9/_.,;:!?-]{0,20}",
        ) {
            let text = format!("x https://host.example/{path}) y");
            for url in extract_urls(&text, TrimPolicy::Run) {
                prop_assert!(is_whole_match(&url));
                prop_assert_eq!(extract_urls(&url, TrimPolicy::Run), vec![url.clone()]);
            }
        }
    }
}
