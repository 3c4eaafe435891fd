//! Author-to-affiliation alignment.
//!
//! Authors either carry superscript digits (`Smith J.1`) that point into a numbered
//! list of affiliation lines, or carry nothing, in which case the first line that
//! looks like an address is shared by everyone.

use super::byline::AuthorName;
use crate::config::ExtractorConfig;
use crate::diagnostics::{Field, Finding};
use crate::utils::find_ignore_ascii_case;

/// Lines between the title line and the abstract marker.
///
/// The title line is the first line holding a four-digit run.
pub(super) fn affiliation_candidates<'a>(lines: &[&'a str], config: &ExtractorConfig) -> Vec<&'a str> {
    let Some(title_line) = lines
        .iter()
        .position(|line| config.article_year_re.is_match(line))
    else {
        return Vec::new();
    };
    lines[title_line + 1..]
        .iter()
        .take_while(|line| !config.abstract_re.is_match(line))
        .copied()
        .collect()
}

/// One affiliation per author; unresolved slots stay empty.
pub(super) fn resolve_affiliations(
    authors: &[AuthorName],
    candidates: &[&str],
    config: &ExtractorConfig,
) -> (Vec<String>, Vec<Finding>) {
    let marker_count: usize = authors.iter().map(|author| author.markers.len()).sum();
    if marker_count == 0 {
        shared_affiliation(authors.len(), candidates, config)
    } else {
        numbered_affiliations(authors, marker_count, candidates, config)
    }
}

fn shared_affiliation(
    author_count: usize,
    candidates: &[&str],
    config: &ExtractorConfig,
) -> (Vec<String>, Vec<Finding>) {
    let address = candidates.iter().find(|line| {
        let lower = line.to_ascii_lowercase();
        line.contains('@')
            || config
                .email_labels
                .iter()
                .any(|label| lower.contains(label.as_str()))
            || config
                .country_re
                .as_ref()
                .is_some_and(|countries| countries.is_match(line))
    });

    match address {
        Some(line) => {
            let affiliation = clean_affiliation(
                line.trim_start_matches(|c: char| c.is_ascii_digit()),
                &config.email_labels,
            );
            (vec![affiliation; author_count], Vec::new())
        }
        None => (
            vec![String::new(); author_count],
            vec![Finding::warning(
                Field::Affiliations,
                "no address line found for the shared affiliation",
            )],
        ),
    }
}

fn numbered_affiliations(
    authors: &[AuthorName],
    marker_count: usize,
    candidates: &[&str],
    config: &ExtractorConfig,
) -> (Vec<String>, Vec<Finding>) {
    let mut findings = Vec::new();
    if marker_count > authors.len() {
        findings.push(Finding::error(
            Field::Affiliations,
            format!(
                "{} affiliation markers for {} authors",
                marker_count,
                authors.len()
            ),
        ));
    }

    let mut affiliations = Vec::with_capacity(authors.len());
    for author in authors {
        let Some(&marker) = author.markers.first() else {
            findings.push(Finding::warning(
                Field::Affiliations,
                format!("no affiliation marker for {}", author.name),
            ));
            affiliations.push(String::new());
            continue;
        };
        let line = candidates.iter().find_map(|line| {
            line.strip_prefix(marker)
                .filter(|rest| !rest.starts_with(|c: char| c.is_ascii_digit()))
        });
        match line {
            Some(rest) => affiliations.push(clean_affiliation(rest, &config.email_labels)),
            None => {
                findings.push(Finding::warning(
                    Field::Affiliations,
                    format!("no affiliation line for marker {marker}"),
                ));
                affiliations.push(String::new());
            }
        }
    }
    (affiliations, findings)
}

/// Cut at the first email label, then at `;`, then drop a trailing period.
fn clean_affiliation(line: &str, email_labels: &[String]) -> String {
    let cut = email_labels
        .iter()
        .filter_map(|label| find_ignore_ascii_case(line, label))
        .min()
        .unwrap_or(line.len());
    let line = &line[..cut];
    let line = line.split(';').next().unwrap_or(line).trim();
    line.strip_suffix('.').unwrap_or(line).trim().to_string()
}
