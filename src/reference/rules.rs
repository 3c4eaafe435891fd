//! The built-in title/meta split rules, most specific first.

use super::classify::{find_publisher, find_separator};
use super::{SplitInput, SplitRule, TitleMeta};
use crate::ReferenceKind;
use crate::config::ExtractorConfig;
use crate::utils::char_len;

/// The default cascade in the order it is tried.
pub(crate) fn default_cascade() -> Vec<SplitRule> {
    vec![
        SplitRule::new("bracketed-title", starts_with_bracket, split_bracketed),
        SplitRule::new("chapter-editor", is_chapter, split_before_editor),
        SplitRule::new("double-slash", always, split_at_double_slash),
        SplitRule::new("city-publisher", always, split_at_publisher),
        SplitRule::new("publication-marker", always, split_at_publication_marker),
        SplitRule::new("sentence-end", always, split_at_sentence_end),
    ]
}

fn always(_: &SplitInput<'_>) -> bool {
    true
}

fn starts_with_bracket(input: &SplitInput<'_>) -> bool {
    input.remainder.starts_with('[')
}

fn is_chapter(input: &SplitInput<'_>) -> bool {
    input.kind == ReferenceKind::Chapter
}

/// `[Translated title].` up to the matching bracket and one period.
fn split_bracketed(input: &SplitInput<'_>, _: &ExtractorConfig) -> Option<TitleMeta> {
    let s = input.remainder;
    let mut depth = 0usize;
    let close = s.char_indices().find_map(|(idx, c)| {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
        None
    })?;

    let mut end = close + 1;
    if s[end..].starts_with('.') {
        end += 1;
    }
    let meta = s[end..].trim();
    let meta = meta.strip_prefix("//").unwrap_or(meta);
    Some(TitleMeta {
        title: s[..end].trim().to_string(),
        meta: meta
            .trim_start_matches(|c: char| c == '.' || c.is_whitespace())
            .to_string(),
    })
}

/// Chapter title ends where `// Editor (Ed.):` begins; the clause itself is dropped.
fn split_before_editor(input: &SplitInput<'_>, config: &ExtractorConfig) -> Option<TitleMeta> {
    let s = input.remainder;
    let clause = config.editor_clause_re.find(s)?;
    Some(TitleMeta {
        title: s[..clause.start()].trim().to_string(),
        meta: s[clause.end()..]
            .trim_start_matches([' ', '\t', '.', '/'])
            .trim()
            .to_string(),
    })
}

fn split_at_double_slash(input: &SplitInput<'_>, _: &ExtractorConfig) -> Option<TitleMeta> {
    let s = input.remainder;
    let idx = find_separator(s)?;
    let meta = s[idx + 2..].trim_start();
    let meta = meta.strip_prefix(". ").unwrap_or(meta);
    let meta = meta.strip_prefix("//").unwrap_or(meta);
    Some(TitleMeta {
        title: s[..idx].trim().to_string(),
        meta: meta.trim().to_string(),
    })
}

fn split_at_publisher(input: &SplitInput<'_>, config: &ExtractorConfig) -> Option<TitleMeta> {
    let at = find_publisher(input.remainder, config)?;
    Some(TitleMeta::split_at(input.remainder, at))
}

/// Earliest publication marker after the first sentence.
///
/// Without a period the whole remainder is searched.
fn split_at_publication_marker(
    input: &SplitInput<'_>,
    config: &ExtractorConfig,
) -> Option<TitleMeta> {
    let s = input.remainder;
    let from = match s.find('.') {
        Some(dot) => {
            let after = &s[dot + 1..];
            dot + 1 + after.len() - after.trim_start_matches([' ', '\t']).len()
        }
        None => 0,
    };
    let window = s[from..].to_ascii_lowercase();
    let at = config
        .publication_markers
        .iter()
        .filter_map(|marker| window.find(&marker.to_ascii_lowercase()))
        .min()?;
    Some(TitleMeta::split_at(s, from + at))
}

/// First period that looks like the end of a sentence, if the split it gives is plausible.
fn split_at_sentence_end(input: &SplitInput<'_>, config: &ExtractorConfig) -> Option<TitleMeta> {
    let s = input.remainder;
    let thresholds = &config.thresholds;
    let dot = s
        .char_indices()
        .take(thresholds.max_title_scan)
        .enumerate()
        .filter(|&(pos, (_, c))| c == '.' && pos >= thresholds.min_title_len)
        .map(|(_, (byte, _))| byte)
        .find(|&byte| {
            !is_abbreviation(s, byte, &config.abbreviations) && opens_sentence(&s[byte + 1..])
        })?;

    let split = TitleMeta {
        title: s[..=dot].trim().to_string(),
        meta: s[dot + 1..].trim().to_string(),
    };
    validate_split(&split, thresholds.min_title_ratio).then_some(split)
}

/// Whitespace, then an uppercase letter or an opening bracket.
fn opens_sentence(rest: &str) -> bool {
    let trimmed = rest.trim_start();
    trimmed.len() < rest.len()
        && trimmed
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c == '[' || c == '(')
}

/// Whether the period at byte `dot` closes a whole-word abbreviation.
fn is_abbreviation(s: &str, dot: usize, abbreviations: &[String]) -> bool {
    abbreviations.iter().any(|abbr| {
        let Some(start) = dot.checked_sub(abbr.len()) else {
            return false;
        };
        s.get(start..dot)
            .is_some_and(|word| word.eq_ignore_ascii_case(abbr))
            && !s[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphabetic)
    })
}

fn validate_split(split: &TitleMeta, min_title_ratio: f64) -> bool {
    let title_len = char_len(&split.title);
    let total = title_len + char_len(&split.meta);
    if total == 0 || (title_len as f64) / (total as f64) < min_title_ratio {
        return false;
    }
    !split.meta.chars().next().is_some_and(char::is_lowercase)
}
