//! Report rendering
//!
//! Every renderer is a pure function returning the full document as a
//! `String`. Commands decide where it goes.

use crate::aggregate::Statistics;
use crate::classify::repo_name;
use crate::config::TOP_MENTIONS;
use crate::pipeline::{Census, MentionCensus};
use crate::schema::ClassifiedUrl;
use std::fmt::{self, Write};

const WIDE: usize = 120;
const NARROW: usize = 80;
const TABLE_URL_CHARS: usize = 80;
const CONSOLE_CONTEXT_CHARS: usize = 100;

pub const CSV_HEADER: [&str; 7] = [
    "Nr",
    "URL",
    "Typ",
    "Kategorie",
    "Domain",
    "Kontext/Repo",
    "Beschreibung",
];

/// Console output is abbreviated; files get everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    Console,
    File,
}

fn render_with(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = f(&mut out);
    out
}

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

/// Keep at most `max` chars, marking the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}

/// Labelled counters shared by the console and markdown summaries
fn summary_rows(stats: &Statistics, total: usize) -> [(&'static str, &'static str, usize); 10] {
    [
        ("📦", "GitHub Repositories", stats.github_repos),
        ("🖼️", "GitHub Assets (Bilder)", stats.github_assets),
        ("💖", "Lovable.dev Projekte", stats.lovable_projects),
        ("🗄️", "Supabase Datenbanken", stats.supabase_databases),
        ("🏷️", "Badges (shields.io)", stats.badges),
        ("💬", "Discord Server", stats.discord_servers),
        ("📚", "Package Registries", stats.package_registries),
        ("📖", "Documentation Sites", stats.documentation_sites),
        ("🏗️", "Infrastructure Tools", stats.infrastructure_tools),
        ("📊", "TOTAL URLs", total),
    ]
}

/// Console report of the deduplicating analysis
pub fn render_console_analysis(census: &Census, input: &str) -> String {
    render_with(|out| {
        let bar = rule('=', NARROW);
        let agg = &census.aggregation;

        writeln!(out, "🔍 Analysiere {input}...")?;
        writeln!(out, "{bar}")?;
        writeln!(
            out,
            "\n✅ Gefunden: {} URLs (davon {} unique)",
            census.occurrences,
            census.urls.len()
        )?;
        writeln!(out, "{bar}")?;

        writeln!(out, "\n📊 STATISTIKEN:\n{bar}")?;
        writeln!(out, "\n🔷 Nach Typ:")?;
        for (url_type, count) in agg.types_by_size() {
            writeln!(out, "  {:<20}: {:>3} URLs", url_type.as_str(), count)?;
        }
        writeln!(out, "\n🔷 Nach Kategorie:")?;
        for (category, count) in agg.categories_by_size() {
            writeln!(out, "  {:<20}: {:>3} URLs", category.as_str(), count)?;
        }

        writeln!(out, "\n{bar}\n📋 DETAILLIERTE URL-LISTE:\n{bar}")?;
        for (url_type, bucket) in &agg.by_type {
            writeln!(out, "\n\n{bar}")?;
            writeln!(
                out,
                "🔹 {} ({} URLs)",
                url_type.as_str().to_uppercase(),
                bucket.len()
            )?;
            writeln!(out, "{bar}")?;

            for (i, item) in sorted_by_url(bucket).into_iter().enumerate() {
                writeln!(out, "\n{}. {}", i + 1, item.url)?;
                writeln!(out, "   Typ: {}", item.url_type)?;
                writeln!(out, "   Kategorie: {}", item.category)?;
                writeln!(out, "   Kontext: {}", item.context)?;
                writeln!(out, "   Beschreibung: {}", item.description)?;
            }
        }

        writeln!(out, "\n\n{bar}\n🎯 ZUSAMMENFASSUNG:\n{bar}")?;
        for (icon, label, count) in summary_rows(&agg.statistics, census.urls.len()) {
            writeln!(out, "{icon} {label}: {count}")?;
        }
        Ok(())
    })
}

fn sorted_by_url(bucket: &[ClassifiedUrl]) -> Vec<&ClassifiedUrl> {
    let mut sorted: Vec<&ClassifiedUrl> = bucket.iter().collect();
    sorted.sort_by(|a, b| a.url.cmp(&b.url));
    sorted
}

/// URL_ANALYSE_REPORT.md
pub fn render_markdown_report(census: &Census, input: &str, generated_at: &str) -> String {
    render_with(|out| {
        let agg = &census.aggregation;

        writeln!(out, "# 📊 URL-ANALYSE REPORT\n")?;
        writeln!(out, "**Analysiert:** {input}")?;
        writeln!(out, "**Datum:** {generated_at}\n")?;

        writeln!(out, "## 📈 STATISTIKEN\n")?;
        for (icon, label, count) in summary_rows(&agg.statistics, census.urls.len()) {
            writeln!(out, "- {icon} **{label}:** {count}")?;
        }
        writeln!(out, "\n---\n")?;

        for (url_type, bucket) in &agg.by_type {
            writeln!(
                out,
                "## 🔹 {} ({} URLs)\n",
                url_type.as_str().to_uppercase(),
                bucket.len()
            )?;

            for (i, item) in sorted_by_url(bucket).into_iter().enumerate() {
                writeln!(out, "### {}. {}\n", i + 1, item.description)?;
                writeln!(out, "**URL:** `{}`\n", item.url)?;
                writeln!(out, "- **Typ:** {}", item.url_type)?;
                writeln!(out, "- **Kategorie:** {}", item.category)?;
                writeln!(out, "- **Kontext:** {}", item.context)?;
                writeln!(out, "- **Domain:** {}\n", item.domain)?;
                writeln!(out, "---\n")?;
            }
        }
        Ok(())
    })
}

/// URL_LISTE_VOLLSTAENDIG.csv, rows in record order
pub fn render_csv(records: &[ClassifiedUrl]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for (i, item) in records.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string().as_str(),
            item.url.as_str(),
            item.url_type.as_str(),
            item.category.as_str(),
            item.domain.as_str(),
            item.context.as_str(),
            item.description.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// URL_TABELLE.md
pub fn render_markdown_table(records: &[ClassifiedUrl]) -> String {
    render_with(|out| {
        writeln!(out, "# 📊 VOLLSTÄNDIGE URL-TABELLE\n")?;
        writeln!(out, "| Nr | URL | Typ | Kategorie | Domain | Kontext | Beschreibung |")?;
        writeln!(out, "|---:|-----|-----|-----------|--------|---------|-------------|")?;

        for (i, item) in records.iter().enumerate() {
            writeln!(
                out,
                "| {} | `{}` | {} | {} | {} | {} | {} |",
                i + 1,
                truncate(&item.url, TABLE_URL_CHARS),
                item.url_type,
                item.category,
                item.domain,
                item.context,
                item.description
            )?;
        }
        Ok(())
    })
}

/// Duplicate-inclusive mention report
pub fn render_mentions(census: &MentionCensus, input: &str, style: ReportStyle) -> String {
    render_with(|out| {
        let bar = rule('=', WIDE);
        let summary = &census.summary;

        writeln!(out, "{bar}")?;
        writeln!(out, "VOLLSTÄNDIGE URL-EXTRAKTION AUS {input}")?;
        writeln!(out, "INKLUSIVE ALLER DUPLIKATE UND WIEDERHOLUNGEN")?;
        writeln!(out, "{bar}\n")?;
        writeln!(out, "GESAMTANZAHL URL-ERWÄHNUNGEN: {}", summary.total_mentions)?;
        writeln!(out, "ANZAHL UNIQUE URLs: {}\n", summary.unique_urls)?;

        for group in &summary.groups {
            let n = group.mentions.len();
            writeln!(out, "\n{bar}")?;
            writeln!(out, "KATEGORIE: {}", group.url_type.as_str().to_uppercase())?;
            writeln!(out, "Anzahl Erwähnungen: {n}")?;
            writeln!(out, "{bar}\n")?;

            for (idx, m) in group.mentions.iter().enumerate() {
                let context = match style {
                    ReportStyle::Console => truncate(&m.line_text, CONSOLE_CONTEXT_CHARS),
                    ReportStyle::File => m.line_text.clone(),
                };
                writeln!(out, "[{}/{n}]", idx + 1)?;
                writeln!(out, "  URL:         {}", m.url)?;
                writeln!(out, "  TYPE:        {}", m.url_type)?;
                writeln!(out, "  SECTION:     {}", m.section)?;
                writeln!(out, "  REPO:        {}", m.repository)?;
                writeln!(out, "  ZEILE:       {}", m.line_number)?;
                writeln!(out, "  CONTEXT:     {context}")?;
                writeln!(out)?;
            }
        }

        writeln!(out, "\n{bar}")?;
        match style {
            ReportStyle::Console => {
                writeln!(
                    out,
                    "URL-HÄUFIGKEITSANALYSE (Top {TOP_MENTIONS} meist-erwähnte URLs)"
                )?;
                writeln!(out, "{bar}")?;
                let top = census.frequency.top(TOP_MENTIONS);
                for (idx, (url, count)) in top.into_iter().enumerate() {
                    writeln!(out, "{:>2}. [{:>3}x] {url}", idx + 1, count)?;
                }
            }
            ReportStyle::File => {
                writeln!(out, "URL-HÄUFIGKEITSANALYSE")?;
                writeln!(out, "{bar}\n")?;
                for (idx, (url, count)) in census.frequency.ranked().into_iter().enumerate() {
                    writeln!(out, "{:>3}. [{:>3}x] {url}", idx + 1, count)?;
                }
            }
        }

        writeln!(out, "\n{bar}")?;
        writeln!(out, "ZUSAMMENFASSUNG NACH TYP:")?;
        writeln!(out, "{bar}")?;
        for group in &summary.groups {
            writeln!(
                out,
                "{:<20}: {:>4} Erwähnungen ({:>3} unique URLs)",
                group.url_type.as_str(),
                group.mentions.len(),
                group.unique_urls
            )?;
        }
        writeln!(
            out,
            "\n{:<20}: {:>4} Erwähnungen ({:>3} unique URLs)",
            "TOTAL", summary.total_mentions, summary.unique_urls
        )?;
        writeln!(out, "{bar}")?;
        Ok(())
    })
}

/// Sorted unique URL listing with repository names
pub fn render_listing(census: &Census, input: &str, style: ReportStyle) -> String {
    render_with(|out| {
        let bar = rule('=', NARROW);
        let thin = rule('-', NARROW);
        let agg = &census.aggregation;

        writeln!(out, "{bar}")?;
        writeln!(out, "URL EXTRACTION REPORT - {input}")?;
        writeln!(out, "{bar}\n")?;

        if style == ReportStyle::Console {
            writeln!(out, "✅ Gefundene URLs: {}\n", census.urls.len())?;

            writeln!(out, "{bar}\n📊 URLS GRUPPIERT NACH TYP\n{bar}\n")?;
            for (url_type, bucket) in &agg.by_type {
                writeln!(
                    out,
                    "\n### {} ({} URLs)\n{thin}",
                    url_type.as_str().to_uppercase(),
                    bucket.len()
                )?;
                for item in sorted_by_url(bucket) {
                    writeln!(out, "  - {}", item.url)?;
                }
            }

            writeln!(out, "\n\n\n{bar}\n📁 URLS GRUPPIERT NACH KATEGORIE\n{bar}\n")?;
            for (category, bucket) in &agg.by_category {
                writeln!(
                    out,
                    "\n### {} ({} URLs)\n{thin}",
                    category.as_str().to_uppercase(),
                    bucket.len()
                )?;
                for item in sorted_by_url(bucket) {
                    writeln!(out, "  - {}", item.url)?;
                }
            }
            writeln!(out, "\n\n")?;
        } else {
            writeln!(out, "Total URLs found: {}\n", census.urls.len())?;
        }

        writeln!(out, "{bar}\nDETAILLIERTE STRUKTURIERTE URL-LISTE\n{bar}\n")?;
        for (i, item) in census.sorted_urls().into_iter().enumerate() {
            let description = if item.description.is_empty() {
                "Web Resource"
            } else {
                item.description.as_str()
            };
            writeln!(out, "\n--- URL #{} ---", i + 1)?;
            writeln!(out, "URL: {}", item.url)?;
            writeln!(out, "TYPE: {}", item.url_type)?;
            writeln!(out, "CATEGORY: {}", item.category)?;
            writeln!(out, "REPO: {}", repo_name(&item.url))?;
            writeln!(out, "DESCRIPTION: {description}")?;
        }
        Ok(())
    })
}
