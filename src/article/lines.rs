/// Split a reference section into raw citation strings.
///
/// Any line-ending convention is accepted. Blank lines are dropped and a stray
/// closing delimiter is removed from the last citation.
pub(super) fn split_references(section: &str, close_delimiter: &str) -> Vec<String> {
    let mut references: Vec<String> = section
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(last) = references.last_mut() {
        if let Some(stripped) = last.strip_suffix(close_delimiter) {
            *last = stripped.trim_end().to_string();
        }
        if last.is_empty() {
            references.pop();
        }
    }
    references
}

/// Trimmed, non-empty lines of an article body.
///
/// Tries CRLF, then LF, then CR and keeps the first split that gives more than
/// one line.
pub(super) fn article_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    for separator in ["\r\n", "\n", "\r"] {
        lines = text
            .split(separator)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() > 1 {
            break;
        }
    }
    lines
}
