//! Heading lookup for URL context labels
//!
//! Two flavours:
//! - `locate_heading`: nearest heading above a URL's first occurrence
//! - `SectionTracker`: running repository/section labels for a top-down walk

use crate::config::CONTEXT_WINDOW;
use crate::extract::text_before_url;

/// Sentinel for "no heading found"
pub const UNKNOWN: &str = "Unknown";

const H3: &str = "### ";
const H2: &str = "## ";
const SECTION_MARKER: &str = "## 🏷️";

/// Heading text of `line` if it starts with a `### ` or `## ` marker
fn heading_text(line: &str) -> Option<&str> {
    line.strip_prefix(H3)
        .or_else(|| line.strip_prefix(H2))
        .map(str::trim)
}

/// Find the heading nearest above the first line containing `url`.
///
/// Looks at no more than [`CONTEXT_WINDOW`] preceding lines. Returns
/// [`UNKNOWN`] if the URL is absent or no heading is in range.
pub fn locate_heading<S: AsRef<str>>(lines: &[S], url: &str) -> String {
    let Some(found) = lines.iter().position(|l| l.as_ref().contains(url)) else {
        return UNKNOWN.to_string();
    };

    let start = found.saturating_sub(CONTEXT_WINDOW);
    lines[start..found]
        .iter()
        .rev()
        .find_map(|l| heading_text(l.as_ref()))
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Running labels while walking a document line by line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTracker {
    repository: String,
    section: String,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self {
            repository: UNKNOWN.to_string(),
            section: UNKNOWN.to_string(),
        }
    }
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update labels from `line`. Call before recording URLs on that line.
    ///
    /// Labels stop at the first URL, so a heading's own links stay out of it.
    pub fn observe(&mut self, line: &str) {
        let line = text_before_url(line);
        if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
            self.section = rest.trim().to_string();
        }

        // "### 3. acme/widget" -> "acme/widget"
        if line.starts_with(H3) {
            if let Some((_, name)) = line.split_once(". ") {
                self.repository = name.trim().to_string();
            }
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}
