//! Decoding of the journals' structured article DOIs.
//!
//! The publisher encodes the issue position in the DOI suffix, e.g.
//! `10.15298/rusentj.34.3.01` is article 1 of volume 34, issue 3 of the Russian
//! Entomological Journal. This is what the issue catalog lookup is keyed on.
//!
//! # Example
//!
//! ```
//! use issuebib::IssueDoi;
//!
//! let doi = IssueDoi::parse("10.15298/euroasentj.23.03.01").unwrap();
//! assert_eq!(doi.journal_code, "euroasentj");
//! assert_eq!((doi.volume, doi.issue, doi.article), (23, 3, 1));
//! assert_eq!(doi.journal_abbreviation(), Some("EEJ"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Journal codes and their short names.
const JOURNAL_ABBREVIATIONS: &[(&str, &str)] = &[
    ("euroasentj", "EEJ"),
    ("rusentj", "REJ"),
    ("invertzool", "IZ"),
    ("arthsel", "AS"),
];

/// An article DOI of the form `[prefix/]journal.volume.issue.article`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueDoi {
    /// Registrant prefix such as `10.15298`, if present
    pub prefix: Option<String>,
    pub journal_code: String,
    pub volume: u32,
    pub issue: u32,
    pub article: u32,
}

impl IssueDoi {
    /// Decode `doi`. Returns `None` unless the suffix has exactly four dot-separated
    /// parts: an alphabetic journal code and three numbers.
    pub fn parse(doi: &str) -> Option<Self> {
        let doi = doi.trim();
        let (prefix, suffix) = match doi.rsplit_once('/') {
            Some((prefix, suffix)) => (Some(prefix.to_string()), suffix),
            None => (None, doi),
        };

        let mut parts = suffix.split('.');
        let journal = parts.next()?;
        let volume = parts.next()?;
        let issue = parts.next()?;
        let article = parts.next()?;
        if parts.next().is_some()
            || journal.is_empty()
            || !journal.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }

        Some(Self {
            prefix,
            journal_code: journal.to_ascii_lowercase(),
            volume: parse_number(volume)?,
            issue: parse_number(issue)?,
            article: parse_number(article)?,
        })
    }

    /// Short name of a known journal.
    pub fn journal_abbreviation(&self) -> Option<&'static str> {
        JOURNAL_ABBREVIATIONS
            .iter()
            .find(|(code, _)| *code == self.journal_code)
            .map(|(_, abbreviation)| *abbreviation)
    }
}

/// Digits only; leading zeros are dropped.
fn parse_number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for IssueDoi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}/")?;
        }
        write!(
            f,
            "{}.{}.{}.{:02}",
            self.journal_code, self.volume, self.issue, self.article
        )
    }
}
