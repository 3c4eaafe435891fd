//! Compiled pattern table shared by every extraction stage.
//!
//! An [`ExtractorConfig`] is built once, then handed by reference to the segmenter,
//! the article field extractor and the reference cascade. It is never mutated after
//! [`ExtractorConfigBuilder::build`] returns.
//!
//! # Example
//!
//! ```
//! use issuebib::{ExtractorConfig, SplitThresholds};
//!
//! let config = ExtractorConfig::builder()
//!     .delimiters("[[refs]]", "[[/refs]]")
//!     .thresholds(SplitThresholds {
//!         min_title_len: 10,
//!         ..SplitThresholds::default()
//!     })
//!     .build()
//!     .unwrap();
//! assert_eq!(config.thresholds().min_title_len, 10);
//! ```

use crate::reference::{SplitRule, default_cascade};
use crate::{ExtractionError, Result};
use itertools::Itertools;
use regex::{Regex, escape};

const DEFAULT_OPEN_DELIMITER: &str = "<<<";
const DEFAULT_CLOSE_DELIMITER: &str = ">>>";

const ABSTRACT_PATTERN: &str = r"(?i)\babstract\s*[.:]";
const KEYWORDS_PATTERN: &str = r"(?i)\bkey\s?words\s*[.:]";
const DOI_PATTERN: &str = r"(?i)\bdoi[\s.:]*((?:https?://(?:dx\.)?doi\.org/)?\d\S*)";

/// Markers that usually open the publication data of a citation.
///
/// Searched case-insensitively; the earliest hit wins, not the first in the list.
const PUBLICATION_MARKERS: &[&str] = &[
    "available online",
    "available at",
    "available from",
    "available on",
    "available:",
    "online at",
    "online:",
    "internet resource:",
    "internet resource",
    "accessed on",
    "accessed",
    "retrieved",
    "visited",
    "proceedings of",
    "proceedings",
    "journal",
    "transactions",
    "bulletin",
    "annals",
    "vol.",
    "http://",
    "https://",
    // imprint cities common in the journals' reference lists
    "Moscow:",
    "Moskva:",
    "St. Petersburg:",
    "Saint Petersburg:",
    "Leningrad:",
    "Novosibirsk:",
    "Vladivostok:",
    "Tomsk:",
    "Kiev:",
    "Kyiv:",
    "Minsk:",
    "Almaty:",
    "London:",
    "Oxford:",
    "Cambridge:",
    "Berlin:",
    "Leiden:",
    "Amsterdam:",
    "Paris:",
    "Washington:",
    "New York:",
    "Texas:",
    "Tokyo:",
    "Beijing:",
    "Sofia:",
];

/// Abbreviations whose trailing period does not end a title.
const ABBREVIATIONS: &[&str] = &[
    "St", "Vol", "No", "Nos", "Pt", "P", "S", "Bd", "Ed", "Eds", "T", "Ch", "Art", "Ph", "Dr",
    "Mr", "Mrs", "Ms",
];

/// Signals that a citation points at a web resource. Lowercase.
const ONLINE_SIGNALS: &[&str] = &[
    "available from:",
    "available at:",
    "available online:",
    "available on:",
    "available:",
    "internet resource",
    "online at",
    "accessed on:",
];

const EMAIL_LABELS: &[&str] = &["e-mail", "email"];

/// Country names that mark a line as a postal address.
const COUNTRIES: &[&str] = &[
    "Russia",
    "Russian Federation",
    "Kazakhstan",
    "Kyrgyzstan",
    "Uzbekistan",
    "Tajikistan",
    "Turkmenistan",
    "Ukraine",
    "Belarus",
    "Mongolia",
    "China",
    "Japan",
    "Korea",
    "Vietnam",
    "India",
    "Iran",
    "Turkey",
    "Georgia",
    "Armenia",
    "Azerbaijan",
    "Israel",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Portugal",
    "Austria",
    "Switzerland",
    "Netherlands",
    "Belgium",
    "Poland",
    "Czech Republic",
    "Slovakia",
    "Hungary",
    "Bulgaria",
    "Finland",
    "Sweden",
    "Norway",
    "Denmark",
    "Estonia",
    "Latvia",
    "Lithuania",
    "United Kingdom",
    "UK",
    "USA",
    "Canada",
    "Mexico",
    "Brazil",
    "Argentina",
    "Australia",
    "New Zealand",
    "South Africa",
];

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    fn push(&mut self, value: T) {
        match self {
            ListOverride::Default => *self = ListOverride::Extend(vec![value]),
            ListOverride::Replace(v) | ListOverride::Extend(v) => v.push(value),
        }
    }
}

/// Numeric knobs of the reference title/meta cascade.
///
/// Positions and lengths are counted in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitThresholds {
    /// Periods before this position never end a title.
    pub min_title_len: usize,
    /// The sentence-end scan stops after this many characters.
    pub max_title_scan: usize,
    /// A sentence-end split needs `title / (title + meta)` at least this large.
    pub min_title_ratio: f64,
    /// A `City: Publisher` match past this position is always accepted.
    pub publisher_min_pos: usize,
    /// A `City: Publisher` match past this position is accepted after a period.
    pub publisher_min_pos_after_period: usize,
}

impl Default for SplitThresholds {
    fn default() -> Self {
        Self {
            min_title_len: 15,
            max_title_scan: 400,
            min_title_ratio: 0.2,
            publisher_min_pos: 30,
            publisher_min_pos_after_period: 15,
        }
    }
}

/// Read-only table of compiled patterns and tuning values.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    // ── segmentation ──
    pub(crate) close_delimiter: String,
    pub(crate) block_re: Regex,

    // ── article fields ──
    pub(crate) abstract_re: Regex,
    pub(crate) keywords_re: Regex,
    pub(crate) doi_re: Regex,
    pub(crate) article_year_re: Regex,
    pub(crate) page_range_re: Regex,
    pub(crate) footnote_re: Regex,
    pub(crate) marker_re: Regex,
    pub(crate) country_re: Option<Regex>,
    pub(crate) email_labels: Vec<String>,

    // ── reference cascade ──
    pub(crate) reference_year_re: Regex,
    pub(crate) initial_re: Regex,
    pub(crate) editor_kind_re: Regex,
    pub(crate) editor_clause_re: Regex,
    pub(crate) editor_prefix_re: Regex,
    pub(crate) city_publisher_re: Regex,
    pub(crate) online_signals: Vec<String>,
    pub(crate) publication_markers: Vec<String>,
    pub(crate) abbreviations: Vec<String>,
    pub(crate) cascade: Vec<SplitRule>,
    pub(crate) thresholds: SplitThresholds,

    pub(crate) run_in_parallel: bool,
}

/// The built-in patterns are constants compiled in the unit tests, so this cannot
/// panic; a custom pattern only fails through [`ExtractorConfigBuilder::build`].
impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfigBuilder::new()
            .build()
            .expect("built-in patterns compile")
    }
}

impl ExtractorConfig {
    /// Start a builder seeded with the built-in defaults.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }

    pub fn thresholds(&self) -> &SplitThresholds {
        &self.thresholds
    }

    /// Names of the split rules in the order they are tried.
    pub fn cascade_names(&self) -> Vec<&'static str> {
        self.cascade.iter().map(SplitRule::name).collect_vec()
    }

    pub fn publication_markers(&self) -> &[String] {
        &self.publication_markers
    }

    pub fn run_in_parallel(&self) -> bool {
        self.run_in_parallel
    }
}

/// Builder for [`ExtractorConfig`].
///
/// Accepts string patterns that are compiled in [`build()`](Self::build).
/// Fails with [`ExtractionError`] if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfigBuilder {
    delimiters: Option<(String, String)>,
    abstract_pattern: Option<String>,
    keywords_pattern: Option<String>,
    doi_pattern: Option<String>,
    publication_markers: ListOverride<String>,
    abbreviations: ListOverride<String>,
    countries: ListOverride<String>,
    email_labels: ListOverride<String>,
    cascade: Option<Vec<SplitRule>>,
    thresholds: Option<SplitThresholds>,
    run_in_parallel: bool,
}

impl ExtractorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Segmentation ──

    /// Markers that open and close each article's reference section.
    pub fn delimiters(mut self, open: &str, close: &str) -> Self {
        self.delimiters = Some((open.to_string(), close.to_string()));
        self
    }

    // ── Article markers ──

    pub fn abstract_regex(mut self, pattern: &str) -> Self {
        self.abstract_pattern = Some(pattern.to_string());
        self
    }

    pub fn keywords_regex(mut self, pattern: &str) -> Self {
        self.keywords_pattern = Some(pattern.to_string());
        self
    }

    /// DOI line pattern. Capture group 1 must hold the DOI itself.
    pub fn doi_regex(mut self, pattern: &str) -> Self {
        self.doi_pattern = Some(pattern.to_string());
        self
    }

    pub fn set_countries(mut self, countries: Vec<String>) -> Self {
        self.countries = ListOverride::Replace(countries);
        self
    }

    pub fn add_country(mut self, country: &str) -> Self {
        self.countries.push(country.to_string());
        self
    }

    pub fn set_email_labels(mut self, labels: Vec<String>) -> Self {
        self.email_labels = ListOverride::Replace(labels);
        self
    }

    // ── Reference cascade ──

    pub fn set_publication_markers(mut self, markers: Vec<String>) -> Self {
        self.publication_markers = ListOverride::Replace(markers);
        self
    }

    pub fn add_publication_marker(mut self, marker: &str) -> Self {
        self.publication_markers.push(marker.to_string());
        self
    }

    pub fn set_abbreviations(mut self, abbreviations: Vec<String>) -> Self {
        self.abbreviations = ListOverride::Replace(abbreviations);
        self
    }

    pub fn add_abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviations.push(abbreviation.to_string());
        self
    }

    /// Replace the ordered list of title/meta split rules.
    pub fn cascade(mut self, rules: Vec<SplitRule>) -> Self {
        self.cascade = Some(rules);
        self
    }

    pub fn thresholds(mut self, thresholds: SplitThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Extract articles on the rayon pool. Needs the `parallel` feature.
    pub fn run_in_parallel(mut self, enabled: bool) -> Self {
        self.run_in_parallel = enabled;
        self
    }

    /// Compile all patterns and validate the settings.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidPattern` for a pattern that does not compile
    /// and `ExtractionError::InvalidConfig` for out-of-range values.
    pub fn build(self) -> Result<ExtractorConfig> {
        let (open, close) = self.delimiters.unwrap_or_else(|| {
            (
                DEFAULT_OPEN_DELIMITER.to_string(),
                DEFAULT_CLOSE_DELIMITER.to_string(),
            )
        });
        if open.is_empty() || close.is_empty() {
            return Err(ExtractionError::InvalidConfig(
                "reference delimiters must not be empty".into(),
            ));
        }
        if open == close {
            return Err(ExtractionError::InvalidConfig(format!(
                "opening and closing delimiters are both '{open}'"
            )));
        }

        let thresholds = self.thresholds.unwrap_or_default();
        if !(0.0..=1.0).contains(&thresholds.min_title_ratio) {
            return Err(ExtractionError::InvalidConfig(format!(
                "min_title_ratio {} is outside 0..=1",
                thresholds.min_title_ratio
            )));
        }
        if thresholds.max_title_scan == 0 {
            return Err(ExtractionError::InvalidConfig(
                "max_title_scan must be positive".into(),
            ));
        }

        let doi_re = Regex::new(self.doi_pattern.as_deref().unwrap_or(DOI_PATTERN))?;
        if doi_re.captures_len() < 2 {
            return Err(ExtractionError::InvalidConfig(
                "DOI pattern needs a capture group for the DOI".into(),
            ));
        }

        let countries = self.countries.resolve(&owned(COUNTRIES));
        let country_re = if countries.is_empty() {
            None
        } else {
            let alternatives = countries.iter().map(|c| escape(c)).join("|");
            Some(Regex::new(&format!(r"\b(?:{alternatives})\b"))?)
        };

        Ok(ExtractorConfig {
            block_re: Regex::new(&format!(
                r"(?s)(.*?){}(.*?){}",
                escape(&open),
                escape(&close)
            ))?,
            close_delimiter: close,

            abstract_re: Regex::new(self.abstract_pattern.as_deref().unwrap_or(ABSTRACT_PATTERN))?,
            keywords_re: Regex::new(self.keywords_pattern.as_deref().unwrap_or(KEYWORDS_PATTERN))?,
            doi_re,
            article_year_re: Regex::new(r"\d{4}")?,
            page_range_re: Regex::new(r"\d+\s*[-‐‑‒–—]\s*\d+")?,
            footnote_re: Regex::new(r"(?:\d+,?\*?)+$")?,
            marker_re: Regex::new(r"[\p{L}.](\d)")?,
            country_re,
            email_labels: self
                .email_labels
                .resolve(&owned(EMAIL_LABELS))
                .into_iter()
                .map(|label| label.to_ascii_lowercase())
                .collect(),

            reference_year_re: Regex::new(r"\b(\d{4})([a-z])?(?:\s*[-–—]\s*\d{4})?\b")?,
            initial_re: Regex::new(r"\b\p{Lu}\.")?,
            editor_kind_re: Regex::new(r"(?i)\(\s*(?:eds?|hrsg)\.?\s*\)")?,
            editor_clause_re: Regex::new(r"(?i)//\s*[^/]+?\s*\(\s*(?:eds?|hrsg)\.?\s*\)\s*[:;.]")?,
            editor_prefix_re: Regex::new(r"(?i)^\(\s*(?:eds?|hrsg)\.?\s*\)\s*[:;.]?\s*")?,
            city_publisher_re: Regex::new(
                r"\b\p{Lu}\p{L}+(?:\s+\p{Lu}\p{L}+)*(?:,\s+\p{Lu}\p{L}+)?\s*:\s*\p{Lu}",
            )?,
            online_signals: owned(ONLINE_SIGNALS),
            publication_markers: self
                .publication_markers
                .resolve(&owned(PUBLICATION_MARKERS)),
            abbreviations: self.abbreviations.resolve(&owned(ABBREVIATIONS)),
            cascade: self.cascade.unwrap_or_else(default_cascade),
            thresholds,

            run_in_parallel: self.run_in_parallel,
        })
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
