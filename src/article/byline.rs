//! The byline is the head of an article: authors, year, title and the journal
//! imprint with the page range.

use crate::config::ExtractorConfig;
use crate::diagnostics::{Field, Finding};
use crate::utils::{collapse_whitespace, normalize_page_range};

/// Title, pages and whatever went missing on the way.
#[derive(Debug, Default, PartialEq)]
pub(super) struct Byline {
    pub(super) title: String,
    pub(super) pages: String,
    pub(super) findings: Vec<Finding>,
}

/// Split the article text at the first four-digit run.
///
/// Returns the raw author block and the text after the year. An earlier
/// four-digit number in the author block wins over the real year.
pub(super) fn split_at_year<'a>(
    text: &'a str,
    config: &ExtractorConfig,
) -> Option<(&'a str, &'a str)> {
    let year = config.article_year_re.find(text)?;
    Some((&text[..year.start()], &text[year.end()..]))
}

/// Title before the first `//` (or `/`), page range from the text after it.
pub(super) fn split_title(after_year: &str, config: &ExtractorConfig) -> Byline {
    let Some((title, meta)) = after_year
        .split_once("//")
        .or_else(|| after_year.split_once('/'))
    else {
        let first_line = after_year
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        return Byline {
            title: clean_title(first_line),
            pages: String::new(),
            findings: vec![Finding::warning(
                Field::Title,
                "no journal separator after the title; using the first line",
            )],
        };
    };

    let pages = config
        .page_range_re
        .find(meta)
        .and_then(|range| normalize_page_range(range.as_str()));
    let findings = match pages {
        Some(_) => Vec::new(),
        None => vec![Finding::warning(Field::Pages, "no page range found")],
    };
    Byline {
        title: clean_title(title),
        pages: pages.unwrap_or_default(),
        findings,
    }
}

fn clean_title(raw: &str) -> String {
    let raw = raw.trim();
    collapse_whitespace(raw.strip_prefix('.').unwrap_or(raw))
}

/// One author as written in the byline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct AuthorName {
    /// Name without footnote markers
    pub(super) name: String,
    /// Superscript digits attached to this name, in order
    pub(super) markers: Vec<char>,
}

/// Split the author block into names, keeping each name's own markers.
pub(super) fn parse_authors(author_block: &str, config: &ExtractorConfig) -> Vec<AuthorName> {
    collapse_whitespace(author_block)
        .split(", ")
        .filter_map(|raw| {
            let raw = raw.trim();
            let name = config.footnote_re.replace(raw, "").trim().to_string();
            if name.is_empty() {
                return None;
            }
            let markers = config
                .marker_re
                .captures_iter(raw)
                .filter_map(|caps| caps.get(1)?.as_str().chars().next())
                .collect();
            Some(AuthorName { name, markers })
        })
        .collect()
}
