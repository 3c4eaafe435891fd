//! Non-fatal findings collected while extracting an issue.
//!
//! Extraction steps report what they could not resolve as [`Finding`]s. The article
//! extractor tags each finding with the article index, turning it into a
//! [`Diagnostic`], and the whole run gathers them in a [`Diagnostics`] collector.
//! Entries are only ever appended.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, warn};

/// How much a finding affects the article record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A secondary field is missing; the record is still usable.
    Warning,
    /// A required anchor is missing; dependent fields were left empty.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Article field a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Abstract,
    Keywords,
    Doi,
    Year,
    Title,
    Pages,
    Affiliations,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Abstract => "abstract",
            Field::Keywords => "keywords",
            Field::Doi => "doi",
            Field::Year => "year",
            Field::Title => "title",
            Field::Pages => "pages",
            Field::Affiliations => "affiliations",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding produced by a single extraction step, before it is tied to an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Finding {
    pub(crate) field: Field,
    pub(crate) severity: Severity,
    pub(crate) message: String,
}

impl Finding {
    pub(crate) fn warning(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub(crate) fn error(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Attach the 1-based article index.
    pub(crate) fn at(self, article: usize) -> Diagnostic {
        Diagnostic {
            article,
            field: self.field,
            severity: self.severity,
            message: self.message,
        }
    }
}

/// A heuristic that failed to find what it expected in one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based article index
    pub article: usize,
    pub field: Field,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in article {} ({}): {}",
            self.severity, self.article, self.field, self.message
        )
    }
}

/// Append-only collector of the diagnostics of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic and emit it as a tracing event.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => warn!(
                article = diagnostic.article,
                field = %diagnostic.field,
                "{}",
                diagnostic.message
            ),
            Severity::Error => error!(
                article = diagnostic.article,
                field = %diagnostic.field,
                "{}",
                diagnostic.message
            ),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Diagnostics of the article with the given 1-based index.
    pub fn for_article(&self, article: usize) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(move |d| d.article == article)
    }

    /// Whether any article lost a required anchor.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.record(diagnostic);
        }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(iter);
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Diagnostics {
        vec![
            Finding::warning(Field::Doi, "no DOI line").at(1),
            Finding::error(Field::Year, "no year anchor").at(2),
            Finding::warning(Field::Keywords, "no keywords marker").at(2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_queries() {
        let diagnostics = sample();
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 1);
        assert_eq!(diagnostics.warnings().count(), 2);
        let second: Vec<_> = diagnostics.for_article(2).map(|d| d.field).collect();
        assert_eq!(second, vec![Field::Year, Field::Keywords]);
    }

    #[test]
    fn test_no_errors_when_only_warnings() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(Finding::warning(Field::Pages, "no page range").at(4));
        assert!(!diagnostics.has_errors());
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn test_display() {
        let diagnostic = Finding::error(Field::Abstract, "abstract marker not found").at(3);
        assert_eq!(
            diagnostic.to_string(),
            "error in article 3 (abstract): abstract marker not found"
        );
    }
}
