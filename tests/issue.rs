use issuebib::{
    DocumentParser, ExtractorConfig, Field, IssueExtractor, NOT_MENTIONED, ReferenceKind, Severity,
};
use pretty_assertions::assert_eq;

const ISSUE: &str = "Ivanov I.I.1, Petrov P.P.2 2024. Ground beetles of the Altai Mountains // Euroasian Entomological Journal. Vol.23. No.3. P.7–15.
1 Institute of Systematics and Ecology of Animals, Frunze str. 11, Novosibirsk 630091 Russia. E-mail: ivanov@example.org
2 Altai State University, Lenin Ave. 61, Barnaul 656049 Russia.
doi: 10.15298/euroasentj.23.03.01
Abstract. Twenty species of ground beetles
are recorded from the Altai Mountains.
Key words: Carabidae, Altai, fauna.
<<<
Abramov S.A. 2014. Ecological differentiation of species // Biology Bulletin. Vol.41. P.45-52.
A manual of acarology. 2009. 3rd edition. Texas: Press.
>>>
Sidorov S.S., Kuznetsova K.K. 2024. Spiders of Siberia / Euroasian Entomological Journal. Vol.23. No.3. P.16–20.
Zoological Museum of Moscow State University, Bolshaya Nikitskaya 2, Moscow 125009 Russia.
Abstract: Spiders of Siberia are reviewed.
<<<
GBIF.org 2024. GBIF Occurrence. Available from: https://example.org Accessed 2024-01-01

>>>
";

#[test]
fn test_segments_two_articles() {
    let extractor = IssueExtractor::new();
    assert_eq!(extractor.segment(ISSUE).len(), 2);
}

#[test]
fn test_article_with_numbered_affiliations() {
    let extraction = IssueExtractor::new().parse(ISSUE).unwrap();
    let article = &extraction.articles[0];

    assert_eq!(article.index, 1);
    assert_eq!(article.title, "Ground beetles of the Altai Mountains");
    assert_eq!(article.authors, "Ivanov I.I., Petrov P.P.");
    assert_eq!(
        article.affiliations,
        vec![
            "Institute of Systematics and Ecology of Animals, Frunze str. 11, Novosibirsk 630091 Russia",
            "Altai State University, Lenin Ave. 61, Barnaul 656049 Russia",
        ]
    );
    assert_eq!(article.pages, "007-015");
    assert_eq!(article.doi, "10.15298/euroasentj.23.03.01");
    assert_eq!(
        article.abstract_text,
        "Twenty species of ground beetles are recorded from the Altai Mountains."
    );
    assert_eq!(article.keywords, "Carabidae, Altai, fauna.");
    assert_eq!(extraction.diagnostics.for_article(1).count(), 0);
}

#[test]
fn test_article_references_are_parsed_in_order() {
    let extraction = IssueExtractor::new().parse(ISSUE).unwrap();
    let article = &extraction.articles[0];
    assert_eq!(article.references.len(), 2);
    assert_eq!(article.parsed_references.len(), 2);

    let first = &article.parsed_references[0];
    assert_eq!(first.authors, "Abramov S.A.");
    assert_eq!(first.year, "2014");
    assert_eq!(first.title, "Ecological differentiation of species");
    assert_eq!(first.kind, ReferenceKind::Article);

    let second = &article.parsed_references[1];
    assert_eq!(second.authors, NOT_MENTIONED);
    assert_eq!(second.year, "2009");
    assert!(second.meta.contains("A manual of acarology"));
    assert!(second.meta.contains("Texas: Press"));
}

#[test]
fn test_article_with_shared_affiliation_and_warnings() {
    let extraction = IssueExtractor::new().parse(ISSUE).unwrap();
    let article = &extraction.articles[1];

    assert_eq!(article.index, 2);
    assert_eq!(article.title, "Spiders of Siberia");
    assert_eq!(article.authors, "Sidorov S.S., Kuznetsova K.K.");
    let museum =
        "Zoological Museum of Moscow State University, Bolshaya Nikitskaya 2, Moscow 125009 Russia";
    assert_eq!(article.affiliations, vec![museum, museum]);
    assert_eq!(article.pages, "016-020");
    assert_eq!(article.doi, "");
    assert_eq!(article.abstract_text, "Spiders of Siberia are reviewed.");
    assert_eq!(article.keywords, "");

    assert_eq!(article.references.len(), 1);
    let gbif = &article.parsed_references[0];
    assert_eq!(gbif.kind, ReferenceKind::Online);
    assert_eq!(gbif.title, "GBIF Occurrence.");

    let found: Vec<_> = extraction
        .diagnostics
        .for_article(2)
        .map(|d| (d.field, d.severity))
        .collect();
    assert_eq!(
        found,
        vec![
            (Field::Keywords, Severity::Warning),
            (Field::Doi, Severity::Warning),
        ]
    );
    assert!(!extraction.diagnostics.has_errors());
}

#[test]
fn test_issue_doi_from_first_article() {
    let extraction = IssueExtractor::new().parse(ISSUE).unwrap();
    assert_eq!(extraction.first_doi(), Some("10.15298/euroasentj.23.03.01"));

    let issue = extraction.issue_doi().unwrap();
    assert_eq!(issue.journal_code, "euroasentj");
    assert_eq!((issue.volume, issue.issue, issue.article), (23, 3, 1));
    assert_eq!(issue.journal_abbreviation(), Some("EEJ"));
}

#[test]
fn test_custom_delimiters() {
    let text = ISSUE.replace("<<<", "[refs]").replace(">>>", "[/refs]");
    let config = ExtractorConfig::builder()
        .delimiters("[refs]", "[/refs]")
        .build()
        .unwrap();
    let extraction = IssueExtractor::with_config(config).parse(&text).unwrap();
    assert_eq!(extraction.articles.len(), 2);
    assert_eq!(extraction.articles[1].references.len(), 1);

    // the default delimiters no longer match anything
    assert!(IssueExtractor::new().parse(&text).is_err());
}
