use crate::config::ExtractorConfig;
use crate::diagnostics::{Field, Finding};
use crate::utils::{collapse_whitespace, format_doi};

#[derive(Debug, Default, PartialEq)]
pub(super) struct Sections {
    pub(super) abstract_text: String,
    pub(super) keywords: String,
}

/// Abstract runs from its marker to the keywords marker; keywords run to the end.
pub(super) fn split_sections(text: &str, config: &ExtractorConfig) -> (Sections, Option<Finding>) {
    let Some(marker) = config.abstract_re.find(text) else {
        return (
            Sections::default(),
            Some(Finding::error(Field::Abstract, "abstract marker not found")),
        );
    };
    let after = &text[marker.end()..];

    match config.keywords_re.find(after) {
        Some(keywords) => (
            Sections {
                abstract_text: collapse_whitespace(&after[..keywords.start()]),
                keywords: collapse_whitespace(&after[keywords.end()..]),
            },
            None,
        ),
        None => (
            Sections {
                abstract_text: collapse_whitespace(after),
                keywords: String::new(),
            },
            Some(Finding::warning(Field::Keywords, "keywords marker not found")),
        ),
    }
}

/// DOI from the first line carrying a DOI marker.
pub(super) fn find_doi(lines: &[&str], config: &ExtractorConfig) -> (String, Option<Finding>) {
    lines
        .iter()
        .find_map(|line| config.doi_re.captures(line)?.get(1))
        .map(|doi| (format_doi(doi.as_str()), None))
        .unwrap_or_else(|| {
            (
                String::new(),
                Some(Finding::warning(Field::Doi, "no DOI line found")),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn sections(text: &str) -> (Sections, Option<Finding>) {
        split_sections(text, &ExtractorConfig::default())
    }

    #[test]
    fn test_abstract_and_keywords() {
        let (found, finding) =
            sections("Title\nABSTRACT: First\n  line.\nKeywords. alpha, beta\n");
        assert_eq!(found.abstract_text, "First line.");
        assert_eq!(found.keywords, "alpha, beta");
        assert_eq!(finding, None);
    }

    #[test]
    fn test_missing_keywords_keeps_abstract() {
        let (found, finding) = sections("Abstract. Everything after the marker.");
        assert_eq!(found.abstract_text, "Everything after the marker.");
        assert_eq!(found.keywords, "");
        let finding = finding.unwrap();
        assert_eq!(finding.field, Field::Keywords);
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn test_missing_abstract() {
        let (found, finding) = sections("Key words: only keywords here");
        assert_eq!(found, Sections::default());
        assert_eq!(finding.map(|f| f.severity), Some(Severity::Error));
    }

    #[rstest]
    #[case(&["Title", "DOI: 10.15298/rusentj.34.3.01"], "10.15298/rusentj.34.3.01")]
    #[case(&["doi:10.1000/abc.", "doi: 10.2000/other"], "10.1000/abc")]
    #[case(&["DOI 10.1000/xyz"], "10.1000/xyz")]
    #[case(&["Doi: 10.1000/xyz;"], "10.1000/xyz")]
    #[case(&["DOI: https://doi.org/10.15298/rusentj.34.3.01"], "10.15298/rusentj.34.3.01")]
    #[case(&["doi: http://dx.doi.org/10.1000/abc."], "10.1000/abc")]
    fn test_find_doi(#[case] lines: &[&str], #[case] expected: &str) {
        let (doi, finding) = find_doi(lines, &ExtractorConfig::default());
        assert_eq!(doi, expected);
        assert_eq!(finding, None);
    }

    #[test]
    fn test_no_doi_line() {
        let (doi, finding) = find_doi(&["Title", "doi: pending"], &ExtractorConfig::default());
        assert_eq!(doi, "");
        assert_eq!(finding.map(|f| f.field), Some(Field::Doi));
    }
}
