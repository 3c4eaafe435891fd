//! Citation parser: splits one reference string into authors, year, title and meta.
//!
//! The year is the anchor. Text before it is the author block (or, for institutional
//! and anonymous works, leading text that belongs with the publication data). Text
//! after it is split into title and meta by an ordered cascade of [`SplitRule`]s.
//!
//! # Example
//!
//! ```
//! use issuebib::{ExtractorConfig, ReferenceKind, reference::parse_reference};
//!
//! let config = ExtractorConfig::default();
//! let parsed = parse_reference(
//!     "Abramov S.A. 2014. Ecological differentiation of species // Biology Bulletin. Vol.41. P.45-52.",
//!     &config,
//! );
//! assert_eq!(parsed.authors, "Abramov S.A.");
//! assert_eq!(parsed.year, "2014");
//! assert_eq!(parsed.title, "Ecological differentiation of species");
//! assert_eq!(parsed.meta, "Biology Bulletin. Vol.41. P.45-52.");
//! assert_eq!(parsed.kind, ReferenceKind::Article);
//! ```

mod classify;
mod rules;

use crate::config::ExtractorConfig;
use crate::utils::collapse_whitespace;
use crate::{NOT_MENTIONED, ParsedReference, ReferenceKind};
use compact_str::CompactString;
use std::fmt;

pub use classify::classify;
pub(crate) use rules::default_cascade;

/// What a split rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct SplitInput<'a> {
    /// Text after the year anchor, trimmed, leading period removed
    pub remainder: &'a str,
    pub kind: ReferenceKind,
}

/// A title/meta split proposed by a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMeta {
    pub title: String,
    pub meta: String,
}

impl TitleMeta {
    /// Split `s` at byte offset `at`, trimming both sides.
    pub fn split_at(s: &str, at: usize) -> Self {
        let (title, meta) = s.split_at(at);
        Self {
            title: title.trim().to_string(),
            meta: meta.trim().to_string(),
        }
    }

    fn whole(s: &str) -> Self {
        Self {
            title: s.to_string(),
            meta: String::new(),
        }
    }
}

/// A named heuristic of the title/meta cascade.
///
/// `applies` is a cheap gate on the input; `split` proposes a split or declines.
#[derive(Clone, Copy)]
pub struct SplitRule {
    name: &'static str,
    applies: fn(&SplitInput<'_>) -> bool,
    split: fn(&SplitInput<'_>, &ExtractorConfig) -> Option<TitleMeta>,
}

impl SplitRule {
    pub const fn new(
        name: &'static str,
        applies: fn(&SplitInput<'_>) -> bool,
        split: fn(&SplitInput<'_>, &ExtractorConfig) -> Option<TitleMeta>,
    ) -> Self {
        Self {
            name,
            applies,
            split,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the rule. A proposal with an empty title counts as declining.
    pub fn apply(&self, input: &SplitInput<'_>, config: &ExtractorConfig) -> Option<TitleMeta> {
        if !(self.applies)(input) {
            return None;
        }
        (self.split)(input, config).filter(|split| !split.title.is_empty())
    }
}

impl fmt::Debug for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SplitRule").field(&self.name).finish()
    }
}

/// Located publication year.
#[derive(Debug, Clone, PartialEq, Eq)]
struct YearAnchor {
    start: usize,
    end: usize,
    year: CompactString,
}

/// Parse one raw citation. Never fails; unresolved parts become [`NOT_MENTIONED`].
pub fn parse_reference(raw: &str, config: &ExtractorConfig) -> ParsedReference {
    let text = collapse_whitespace(raw);
    let Some(anchor) = find_year(&text, config) else {
        return ParsedReference::unanchored(text);
    };

    let before_year = text[..anchor.start].trim();
    let remainder = strip_year_period(&text[anchor.end..]);
    let has_authors = is_author_block(before_year, config);

    let input = SplitInput {
        remainder,
        kind: classify(remainder, config),
    };
    let TitleMeta { title, meta } = split_title_meta(&input, config);
    // the prefix belongs to the cascade meta, not to reattached leading text
    let meta = strip_editor_prefix(&meta, config);

    let (authors, meta) = if has_authors {
        (before_year.to_string(), meta)
    } else {
        (NOT_MENTIONED.to_string(), reattach_leading_text(before_year, meta))
    };

    ParsedReference {
        authors,
        year: anchor.year,
        title,
        meta,
        kind: input.kind,
    }
}

/// Run the configured cascade; the whole remainder is the title if no rule fires.
pub(crate) fn split_title_meta(input: &SplitInput<'_>, config: &ExtractorConfig) -> TitleMeta {
    if input.remainder.is_empty() {
        return TitleMeta::default();
    }
    config
        .cascade
        .iter()
        .find_map(|rule| rule.apply(input, config))
        .unwrap_or_else(|| TitleMeta::whole(input.remainder))
}

fn find_year(text: &str, config: &ExtractorConfig) -> Option<YearAnchor> {
    let caps = config.reference_year_re.captures(text)?;
    let whole = caps.get(0)?;
    let year = caps.get(1)?;
    Some(YearAnchor {
        start: whole.start(),
        end: whole.end(),
        year: CompactString::from(year.as_str()),
    })
}

/// Drop spaces and a single period right after the year.
fn strip_year_period(after_year: &str) -> &str {
    let after_year = after_year.trim_start();
    after_year
        .strip_prefix('.')
        .unwrap_or(after_year)
        .trim()
}

/// Commas or initials mark a list of personal names.
fn is_author_block(before_year: &str, config: &ExtractorConfig) -> bool {
    !before_year.is_empty()
        && (before_year.contains(',') || config.initial_re.is_match(before_year))
}

/// Move leading non-author text into the meta unless it is already there.
fn reattach_leading_text(before_year: &str, meta: String) -> String {
    let candidate = before_year.trim_end_matches('.').trim();
    if candidate.is_empty() || meta.to_lowercase().contains(&candidate.to_lowercase()) {
        return meta;
    }
    format!("{before_year} {meta}").trim().to_string()
}

fn strip_editor_prefix(meta: &str, config: &ExtractorConfig) -> String {
    match config.editor_prefix_re.find(meta) {
        Some(prefix) => meta[prefix.end()..].trim().to_string(),
        None => meta.to_string(),
    }
}
