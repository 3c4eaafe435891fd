use itertools::Itertools;

/// Normalizes a page range to zero-padded three-digit numbers on both sides.
///
/// Any dash variant is accepted as the separator and written back as `-`.
/// Numbers longer than three digits are kept as they are.
///
/// # Arguments
///
/// * `range` - A page range such as `7-15` or `7–15`
///
/// # Examples
///
/// ```
/// use issuebib::normalize_page_range;
///
/// assert_eq!(normalize_page_range("7–15").as_deref(), Some("007-015"));
/// assert_eq!(normalize_page_range("007-015").as_deref(), Some("007-015"));
/// assert_eq!(normalize_page_range("e071674"), None);
/// ```
pub fn normalize_page_range(range: &str) -> Option<String> {
    let (from, to) = range.trim().split_once(is_dash)?;
    let (from, to) = (from.trim(), to.trim());
    if !is_page_number(from) || !is_page_number(to) {
        return None;
    }
    Some(format!("{from:0>3}-{to:0>3}"))
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '‐' | '‑' | '‒' | '–' | '—')
}

fn is_page_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Formats a DOI string by removing URL prefixes and trailing punctuation
///
/// # Arguments
///
/// * `doi_str` - The DOI string to format
pub(crate) fn format_doi(doi_str: &str) -> String {
    let doi = doi_str.trim();
    let lower = doi.to_ascii_lowercase();
    let start = ["https://", "http://"]
        .iter()
        .find_map(|scheme| lower.strip_prefix(scheme))
        .and_then(|rest| {
            ["doi.org/", "dx.doi.org/"]
                .iter()
                .find(|host| rest.starts_with(*host))
                .map(|host| doi.len() - rest.len() + host.len())
        })
        .unwrap_or(0);
    doi[start..]
        .trim_end_matches(['.', ',', ';'])
        .trim()
        .to_string()
}

/// Collapses every whitespace run to a single space and trims the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// ASCII lowercasing keeps byte offsets valid for the original string.
pub(crate) fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

/// Number of characters in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("7-15", Some("007-015"))]
    #[case("7–15", Some("007-015"))]
    #[case("7—15", Some("007-015"))]
    #[case("007-015", Some("007-015"))]
    #[case(" 45 - 52 ", Some("045-052"))]
    #[case("101-1205", Some("101-1205"))]
    #[case("e071674", None)]
    #[case("12-", None)]
    #[case("A94-A95", None)]
    #[case("", None)]
    fn test_normalize_page_range(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_page_range(input).as_deref(), expected);
    }

    #[test]
    fn test_normalize_page_range_is_idempotent() {
        for input in ["7-15", "7–15", "123-4567"] {
            let once = normalize_page_range(input).unwrap();
            assert_eq!(normalize_page_range(&once), Some(once.clone()));
        }
    }

    #[rstest]
    #[case("10.15298/rusentj.34.3.01", "10.15298/rusentj.34.3.01")]
    #[case("10.15298/rusentj.34.3.01.", "10.15298/rusentj.34.3.01")]
    #[case(" https://doi.org/10.1000/Test ", "10.1000/Test")]
    #[case("http://dx.doi.org/10.1000/test;", "10.1000/test")]
    #[case("HTTPS://DOI.ORG/10.1000/test", "10.1000/test")]
    fn test_format_doi(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_doi(input), expected);
    }

    #[rstest]
    #[case("  a \n\t b   c ", "a b c")]
    #[case("", "")]
    #[case("single", "single")]
    fn test_collapse_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_whitespace(input), expected);
    }

    #[test]
    fn test_find_ignore_ascii_case() {
        assert_eq!(find_ignore_ascii_case("Museum. E-mail: x@y", "e-mail"), Some(8));
        assert_eq!(find_ignore_ascii_case("Москва. Email: x", "email"), Some(14));
        assert_eq!(find_ignore_ascii_case("nothing", "email"), None);
    }
}
