use crate::ReferenceKind;
use crate::config::ExtractorConfig;
use crate::utils::char_len;

/// Classifies the text after the year anchor.
///
/// Checked in priority order, first match wins: online signals, editor
/// notation, a non-URL `//`, a `City: Publisher` imprint.
pub fn classify(remainder: &str, config: &ExtractorConfig) -> ReferenceKind {
    let lower = remainder.to_ascii_lowercase();
    if config
        .online_signals
        .iter()
        .any(|signal| lower.contains(signal.as_str()))
        || (lower.contains("accessed") && lower.contains("http"))
    {
        ReferenceKind::Online
    } else if config.editor_kind_re.is_match(remainder) {
        ReferenceKind::Chapter
    } else if find_separator(remainder).is_some() {
        ReferenceKind::Article
    } else if find_publisher(remainder, config).is_some() {
        ReferenceKind::Book
    } else {
        ReferenceKind::Other
    }
}

/// Byte offset of the first `//` that is not part of a URL.
pub(crate) fn find_separator(s: &str) -> Option<usize> {
    s.match_indices("//")
        .map(|(idx, _)| idx)
        .find(|&idx| !is_url_slashes(s, idx))
}

/// `//` preceded by `:` or inside a token that starts with `http`.
fn is_url_slashes(s: &str, idx: usize) -> bool {
    let before = &s[..idx];
    if before.ends_with(':') {
        return true;
    }
    let token = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    token.to_ascii_lowercase().starts_with("http")
}

/// Byte offset of a `City: Publisher` imprint that plausibly ends the title.
///
/// A match is skipped when it sits too early to be past the title, and the search
/// stops at a `//`, since anything after one is already publication data.
pub(crate) fn find_publisher(s: &str, config: &ExtractorConfig) -> Option<usize> {
    let thresholds = &config.thresholds;
    for found in config.city_publisher_re.find_iter(s) {
        let before = &s[..found.start()];
        if before.contains("//") {
            return None;
        }
        let position = char_len(before);
        if position > thresholds.publisher_min_pos
            || (position >= thresholds.publisher_min_pos_after_period && before.contains('.'))
        {
            return Some(found.start());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("GBIF Occurrence. Available from: https://example.org", ReferenceKind::Online)]
    #[case("Checklist. Internet resource. www.example.org", ReferenceKind::Online)]
    #[case("Database. Accessed 2024-01-01. https://example.org", ReferenceKind::Online)]
    #[case("Lichens // Hutzinger O. (Ed.): Handbook", ReferenceKind::Chapter)]
    #[case("Käfer // Müller K. (Hrsg.): Fauna", ReferenceKind::Chapter)]
    #[case("Ecological differentiation // Biology Bulletin", ReferenceKind::Article)]
    #[case("Ecology of the region and its insects. Moscow: Nauka. 300 p.", ReferenceKind::Book)]
    #[case("See https://example.org/page for details", ReferenceKind::Other)]
    #[case("3rd edition. Texas: Press.", ReferenceKind::Other)]
    fn test_classify(#[case] remainder: &str, #[case] expected: ReferenceKind) {
        assert_eq!(classify(remainder, &ExtractorConfig::default()), expected);
    }

    #[rstest]
    #[case("Title // Journal", Some(6))]
    #[case("see http://example.org", None)]
    #[case("http://example.org // Journal", Some(19))]
    #[case("ftp://host/file", None)]
    #[case("no separator", None)]
    fn test_find_separator(#[case] s: &str, #[case] expected: Option<usize>) {
        assert_eq!(find_separator(s), expected);
    }

    #[rstest]
    // before the minimum position with no period
    #[case("New York: Academic Press", None)]
    // past 15 characters after a period
    #[case("A study of beetles. Moscow: Nauka", Some(20))]
    // past 30 characters without a period
    #[case("A study of the beetles of the region Moscow: Nauka", Some(37))]
    // imprint inside the journal part
    #[case("A study of the beetles of the region // Moscow: Nauka", None)]
    fn test_find_publisher(#[case] s: &str, #[case] expected: Option<usize>) {
        assert_eq!(find_publisher(s, &ExtractorConfig::default()), expected);
    }
}
