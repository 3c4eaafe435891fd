//! Field extraction for a single article block.
//!
//! The steps run in a fixed order. Each one is a pure function returning its value
//! together with the [`Finding`]s it produced; nothing here ever fails outright. A
//! missing year anchor stops the author/title/affiliation steps, leaving those
//! fields empty.

mod affiliations;
mod byline;
mod lines;
mod sections;

use crate::config::ExtractorConfig;
use crate::diagnostics::{Diagnostic, Field, Finding};
use crate::reference::parse_reference;
use crate::{ArticleBlock, ArticleRecord};
use itertools::Itertools;
use tracing::debug;

use affiliations::{affiliation_candidates, resolve_affiliations};
use byline::{parse_authors, split_at_year, split_title};
use lines::{article_lines, split_references};
use sections::{find_doi, split_sections};

/// Extract the record of the article at the 1-based `index`.
pub(crate) fn extract_article(
    block: &ArticleBlock<'_>,
    index: usize,
    config: &ExtractorConfig,
) -> (ArticleRecord, Vec<Diagnostic>) {
    let mut findings = Vec::new();

    let references = split_references(block.references, &config.close_delimiter);
    let parsed_references = references
        .iter()
        .map(|raw| parse_reference(raw, config))
        .collect();

    let (sections, finding) = split_sections(block.article, config);
    findings.extend(finding);

    let lines = article_lines(block.article);
    let (doi, finding) = find_doi(&lines, config);
    findings.extend(finding);

    let mut record = ArticleRecord {
        index,
        abstract_text: sections.abstract_text,
        keywords: sections.keywords,
        doi,
        references,
        parsed_references,
        ..ArticleRecord::default()
    };

    match split_at_year(block.article, config) {
        Some((author_block, after_year)) => {
            let byline = split_title(after_year, config);
            findings.extend(byline.findings);
            record.title = byline.title;
            record.pages = byline.pages;

            let authors = parse_authors(author_block, config);
            let candidates = affiliation_candidates(&lines, config);
            let (affiliations, found) = resolve_affiliations(&authors, &candidates, config);
            findings.extend(found);
            record.authors = authors.iter().map(|author| author.name.as_str()).join(", ");
            record.affiliations = affiliations;
        }
        None => findings.push(Finding::error(
            Field::Year,
            "no four-digit year anchor; title, pages, authors and affiliations left empty",
        )),
    }

    debug!(
        article = index,
        references = record.references.len(),
        authors = record.author_count(),
        findings = findings.len(),
        "extracted article"
    );
    let diagnostics = findings.into_iter().map(|f| f.at(index)).collect();
    (record, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use pretty_assertions::assert_eq;

    const ARTICLE: &str = "Smith J.1, Doe A.2 2021. Beetles of the steppe // Zoological Journal. Vol.5. P.7–15.
1 University X
2 Institute Y; E-mail: doe@example.org
DOI: 10.15298/rusentj.20.1.02.
Abstract. Beetles were collected
in the steppe.
Key words: Coleoptera, steppe.
";

    fn extract(article: &str, references: &str) -> (ArticleRecord, Vec<Diagnostic>) {
        let block = ArticleBlock {
            article,
            references,
        };
        extract_article(&block, 1, &ExtractorConfig::default())
    }

    #[test]
    fn test_full_article() {
        let (record, diagnostics) = extract(
            ARTICLE,
            "\nAbramov S.A. 2014. Ecological differentiation of species // Biology Bulletin. Vol.41. P.45-52.\n\n",
        );
        assert_eq!(record.index, 1);
        assert_eq!(record.title, "Beetles of the steppe");
        assert_eq!(record.pages, "007-015");
        assert_eq!(record.authors, "Smith J., Doe A.");
        assert_eq!(record.affiliations, vec!["University X", "Institute Y"]);
        assert_eq!(record.doi, "10.15298/rusentj.20.1.02");
        assert_eq!(record.abstract_text, "Beetles were collected in the steppe.");
        assert_eq!(record.keywords, "Coleoptera, steppe.");
        assert_eq!(record.references.len(), 1);
        assert_eq!(record.parsed_references[0].authors, "Abramov S.A.");
        assert_eq!(diagnostics, vec![]);
    }

    #[test]
    fn test_unmarked_author_keeps_own_slot() {
        let (record, diagnostics) = extract(
            "Smith J.1, Doe A., Roe B.2 2021. Beetles // Zool. J. P.7-15.\n1 University X\n2 Institute Y\ndoi: 10.1/x\nAbstract. A.\nKey words: b.",
            "",
        );
        assert_eq!(record.authors, "Smith J., Doe A., Roe B.");
        assert_eq!(record.affiliations, vec!["University X", "", "Institute Y"]);
        let fields: Vec<_> = diagnostics.iter().map(|d| (d.field, d.severity)).collect();
        assert_eq!(fields, vec![(Field::Affiliations, Severity::Warning)]);
    }

    #[test]
    fn test_missing_year_leaves_dependent_fields_empty() {
        let (record, diagnostics) = extract(
            "Untitled contribution\nAbstract: text\nKeywords: word",
            "Ref A. 1999. Title // Journal",
        );
        assert_eq!(record.title, "");
        assert_eq!(record.authors, "");
        assert!(record.affiliations.is_empty());
        assert_eq!(record.abstract_text, "text");
        assert_eq!(record.references, vec!["Ref A. 1999. Title // Journal"]);
        let fields: Vec<_> = diagnostics.iter().map(|d| (d.field, d.severity)).collect();
        assert_eq!(
            fields,
            vec![(Field::Doi, Severity::Warning), (Field::Year, Severity::Error)]
        );
    }

    #[test]
    fn test_missing_abstract_is_error_but_record_survives() {
        let (record, diagnostics) = extract(
            "Smith J. 2020. A title // Journal. P.1-2.\nUniversity X, Russia\ndoi:10.1/x",
            "",
        );
        assert_eq!(record.title, "A title");
        assert_eq!(record.abstract_text, "");
        assert_eq!(record.keywords, "");
        assert_eq!(record.affiliations, vec!["University X, Russia"]);
        assert!(record.references.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, Field::Abstract);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].article, 1);
    }
}
