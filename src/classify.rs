//! URL classification by ordered first-match rules
//!
//! Each rule is a host needle set plus an optional path needle. The first
//! rule whose needles are contained in the (lowercased) URL parts decides the
//! type, category and description. Nothing matched means `other`/`other`/"".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use url::Url;

/// Sentinel for URLs without an owner/repo pair
pub const NOT_APPLICABLE: &str = "N/A";

const GITHUB_HOST: &str = "github.com";

/// Fine-grained origin service of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlType {
    GithubAsset,
    GithubRepo,
    Lovable,
    Supabase,
    Badge,
    Discord,
    Infrastructure,
    Documentation,
    Registry,
    License,
    Platforms,
    Reference,
    Other,
}

impl UrlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlType::GithubAsset => "github-asset",
            UrlType::GithubRepo => "github-repo",
            UrlType::Lovable => "lovable",
            UrlType::Supabase => "supabase",
            UrlType::Badge => "badge",
            UrlType::Discord => "discord",
            UrlType::Infrastructure => "infrastructure",
            UrlType::Documentation => "documentation",
            UrlType::Registry => "registry",
            UrlType::License => "license",
            UrlType::Platforms => "platforms",
            UrlType::Reference => "reference",
            UrlType::Other => "other",
        }
    }
}

/// Coarse grouping used for summary statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creative,
    Devtools,
    Platforms,
    Infrastructure,
    Documentation,
    Security,
    Ai,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Creative => "creative",
            Category::Devtools => "devtools",
            Category::Platforms => "platforms",
            Category::Infrastructure => "infrastructure",
            Category::Documentation => "documentation",
            Category::Security => "security",
            Category::Ai => "ai",
            Category::Other => "other",
        }
    }
}

// Buckets and reports order types/categories by name.
macro_rules! order_by_name {
    ($($t:ty),*) => {$(
        impl Ord for $t {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

order_by_name!(UrlType, Category);

/// Host and path of a URL, lowercased for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// Host plus `:port` when one is given
    pub domain: String,
    /// Path as written in the URL
    pub path: String,
    path_lower: String,
}

impl UrlParts {
    /// Host from the `url` crate; port and path exactly as written.
    ///
    /// Strings the `url` crate rejects keep the written authority as domain.
    pub fn parse(url: &str) -> Self {
        let (authority, path) = split_written(url);
        let host = Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_lowercase));

        let domain = match host {
            Some(host) => match written_port(authority) {
                Some(port) => format!("{host}:{port}"),
                None => host,
            },
            None => authority.to_lowercase(),
        };
        Self::new(domain, path.to_string())
    }

    fn new(domain: String, path: String) -> Self {
        let path_lower = path.to_lowercase();
        Self {
            domain,
            path,
            path_lower,
        }
    }

    pub fn is_github(&self) -> bool {
        self.domain.contains(GITHUB_HOST)
    }
}

/// Authority (userinfo dropped) and path, sliced from the input text
fn split_written(url: &str) -> (&str, &str) {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let authority = authority.rsplit('@').next().unwrap_or_default();
    (authority, path)
}

/// Port digits after the host, kept even when they equal the scheme default
fn written_port(authority: &str) -> Option<&str> {
    if authority.ends_with(']') {
        return None;
    }
    authority
        .rsplit_once(':')
        .map(|(_, port)| port)
        .filter(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

/// One row of the decision table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Any of these must occur in the domain
    pub hosts: &'static [&'static str],
    /// If set, must also occur in the path
    pub path: Option<&'static str>,
    pub url_type: UrlType,
    pub category: Category,
    pub description: &'static str,
}

impl Rule {
    pub fn matches(&self, parts: &UrlParts) -> bool {
        self.hosts.iter().any(|h| parts.domain.contains(h))
            && self.path.map_or(true, |p| parts.path_lower.contains(p))
    }
}

const fn rule(
    hosts: &'static [&'static str],
    url_type: UrlType,
    category: Category,
    description: &'static str,
) -> Rule {
    Rule {
        hosts,
        path: None,
        url_type,
        category,
        description,
    }
}

/// Canonical rule table. Order matters: first match wins.
#[rustfmt::skip]
pub static RULES: &[Rule] = &[
    Rule {
        hosts: &[GITHUB_HOST],
        path: Some("/user-attachments/assets/"),
        url_type: UrlType::GithubAsset,
        category: Category::Creative,
        description: "GitHub Asset/Image",
    },
    rule(&[GITHUB_HOST], UrlType::GithubRepo, Category::Devtools, "GitHub Repository"),
    rule(&["lovable.dev"], UrlType::Lovable, Category::Platforms, "Lovable.dev Project"),
    rule(&["supabase.co"], UrlType::Supabase, Category::Infrastructure, "Supabase Database"),
    rule(&["shields.io", "img.shields.io"], UrlType::Badge, Category::Documentation, "Shields.io Badge"),
    rule(&["discord.gg", "dcbadge.limes.pink"], UrlType::Discord, Category::Platforms, "Discord Server/Badge"),
    rule(&["netlify.app", "netlify.com"], UrlType::Infrastructure, Category::Infrastructure, "Netlify Deployment"),
    rule(&["microsoft.com", "azure.com"], UrlType::Documentation, Category::Documentation, "Microsoft Documentation"),
    rule(&["docker.com", "hub.docker.com"], UrlType::Registry, Category::Infrastructure, "Docker Hub"),
    rule(&["kubernetes.io"], UrlType::Documentation, Category::Infrastructure, "Kubernetes Documentation"),
    rule(&["pypi.org"], UrlType::Registry, Category::Devtools, "Python Package Index"),
    rule(&["nuget.org"], UrlType::Registry, Category::Devtools, "NuGet Package Registry"),
    rule(&["maven"], UrlType::Registry, Category::Devtools, "Maven Repository"),
    rule(&["npmjs.com", "npmjs.org"], UrlType::Registry, Category::Devtools, "NPM Package Registry"),
    rule(&["opensource.org"], UrlType::License, Category::Documentation, "Open Source License"),
    rule(&["vaultproject.io"], UrlType::Infrastructure, Category::Security, "HashiCorp Vault"),
    rule(&["ollama.ai"], UrlType::Infrastructure, Category::Ai, "Ollama AI"),
    rule(&["portainer.io"], UrlType::Infrastructure, Category::Infrastructure, "Portainer"),
    rule(&["onbiela.dev"], UrlType::Platforms, Category::Platforms, "Onbiela Platform"),
    rule(&["macaly-app.com"], UrlType::Platforms, Category::Platforms, "Macaly Application"),
    rule(&["hnoss-ambassador.org"], UrlType::Reference, Category::Documentation, "HNOSS Ambassador Organization"),
    rule(&["universal-values.org"], UrlType::Reference, Category::Documentation, "Universal Values"),
    rule(&["st-daniel-pohl.org"], UrlType::Reference, Category::Documentation, "St. Daniel Pohl"),
    // Shadowed by the microsoft.com rule above.
    rule(&["dotnet.microsoft.com"], UrlType::Documentation, Category::Devtools, ".NET Documentation"),
];

/// Result of classifying one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub url_type: UrlType,
    pub category: Category,
    pub domain: String,
    pub description: String,
}

/// Evaluates a rule table against URLs
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    rules: &'r [Rule],
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl<'r> Classifier<'r> {
    pub fn with_rules(rules: &'r [Rule]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, url: &str) -> Classification {
        let parts = UrlParts::parse(url);

        match self.rules.iter().find(|r| r.matches(&parts)) {
            Some(rule) => Classification {
                url_type: rule.url_type,
                category: rule.category,
                domain: parts.domain,
                description: rule.description.to_string(),
            },
            None => Classification {
                url_type: UrlType::Other,
                category: Category::Other,
                domain: parts.domain,
                description: String::new(),
            },
        }
    }
}

/// Classify with the canonical table
pub fn classify(url: &str) -> Classification {
    Classifier::default().classify(url)
}

/// `owner/repo` for GitHub URLs, [`NOT_APPLICABLE`] otherwise
pub fn repo_name(url: &str) -> String {
    let parts = UrlParts::parse(url);
    if !parts.is_github() {
        return NOT_APPLICABLE.to_string();
    }

    let mut segments = parts.path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => format!("{owner}/{repo}"),
        _ => NOT_APPLICABLE.to_string(),
    }
}
