//! A library for extracting structured article records from converted journal issue text.
//!
//! `issuebib` takes the plain text of one journal issue (as produced by a document
//! converter) and turns it into an ordered list of article records: title, authors,
//! affiliations, abstract, keywords, page range, DOI and a reference list where each
//! citation has been split into authors, year, title and publication metadata.
//!
//! # Pipeline
//!
//! - **Segmentation**: the issue text is cut into article blocks. Each article's
//!   reference list is enclosed between `<<<` and `>>>` right after its body text.
//! - **Article fields**: each block is mined for its fields with layered text
//!   heuristics anchored on the publication year, the `//` journal separator, the
//!   abstract and keyword markers and superscript affiliation markers.
//! - **Reference cascade**: every citation line is split by an ordered list of named
//!   rules. The first rule that applies wins.
//!
//! Problems with a single article never abort the run. They are recorded as
//! [`Diagnostic`] values next to the (possibly partial) records.
//!
//! # Basic Usage
//!
//! ```rust
//! use issuebib::{DocumentParser, IssueExtractor};
//!
//! let text = "Abramov S.A.1 2014. Ecological differentiation // Biology Bulletin. P.45-52.
//! 1 Moscow State University, Moscow, Russia
//! Abstract. Short abstract.
//! Key words: ecology.
//! <<<
//! Bigon M. 1989. [Ecology]. Moscow: Mir. 667 p.
//! >>>";
//!
//! let extraction = IssueExtractor::new().parse(text).unwrap();
//! let article = &extraction.articles[0];
//! assert_eq!(article.title, "Ecological differentiation");
//! assert_eq!(article.pages, "045-052");
//! assert_eq!(article.parsed_references[0].year, "1989");
//! ```
//!
//! # Configuration
//!
//! All patterns live in one read-only [`ExtractorConfig`], compiled once and passed
//! explicitly to every stage. Use [`ExtractorConfigBuilder`] to recalibrate the
//! heuristics for a different journal layout:
//!
//! ```rust
//! use issuebib::{ExtractorConfig, IssueExtractor};
//!
//! let config = ExtractorConfig::builder()
//!     .add_publication_marker("Nauka:")
//!     .build()
//!     .unwrap();
//! let extractor = IssueExtractor::with_config(config);
//! ```
//!
//! # Error Handling
//!
//! Whole-document failures are reported through [`ExtractionError`]; everything
//! article-level is a [`Diagnostic`]:
//!
//! ```rust
//! use issuebib::{DocumentParser, ExtractionError, IssueExtractor};
//!
//! match IssueExtractor::new().parse("no delimiters here") {
//!     Err(ExtractionError::NoArticles) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! # Thread Safety
//!
//! The extractor holds no mutable state and can be shared between threads. With the
//! `parallel` feature, articles of one issue are extracted on the rayon pool.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod article;
pub mod config;
pub mod diagnostics;
pub mod doi;
mod extractor;
pub mod reference;
mod segment;
mod utils;

// Reexports
pub use config::{ExtractorConfig, ExtractorConfigBuilder, ListOverride, SplitThresholds};
pub use diagnostics::{Diagnostic, Diagnostics, Field, Severity};
pub use doi::IssueDoi;
pub use extractor::{IssueExtraction, IssueExtractor};
pub use reference::{SplitInput, SplitRule, TitleMeta};
pub use utils::normalize_page_range;

/// Placeholder written into reference fields that could not be located.
pub const NOT_MENTIONED: &str = "Not mentioned";

/// A specialized Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that stop the extraction of a whole document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Empty input")]
    EmptyInput,

    #[error("No delimited article blocks found")]
    NoArticles,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The span of one article and its embedded reference section.
///
/// Both fields borrow from the document text they were cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleBlock<'a> {
    /// Article text before the reference start marker.
    pub article: &'a str,
    /// Text between the reference start and end markers.
    pub references: &'a str,
}

/// Structured fields extracted from one article block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// 1-based position of the article in the issue
    pub index: usize,
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    /// Normalized author names joined with `", "`
    pub authors: String,
    /// One entry per author, empty where resolution failed
    pub affiliations: Vec<String>,
    /// Page range as `NNN-NNN`, or empty
    pub pages: String,
    pub doi: String,
    /// Raw citation strings in source order
    pub references: Vec<String>,
    /// `references` run through the reference cascade, same order
    pub parsed_references: Vec<ParsedReference>,
}

impl ArticleRecord {
    /// Number of authors the affiliation slots were sized for.
    pub fn author_count(&self) -> usize {
        self.affiliations.len()
    }
}

/// Broad class of a citation, used to pick a title/meta split strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// Journal article, `Title // Journal`
    Article,
    /// Monograph with a `City: Publisher` imprint
    Book,
    /// Contribution to an edited volume, `Title // Editor (Ed.): Book`
    Chapter,
    /// Web resource with an access statement
    Online,
    #[default]
    Other,
}

/// One citation split into its parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReference {
    /// Author list as written, or [`NOT_MENTIONED`]
    pub authors: String,
    /// Four-digit year, or [`NOT_MENTIONED`]
    pub year: CompactString,
    pub title: String,
    /// Trailing publication data, kept raw
    pub meta: String,
    pub kind: ReferenceKind,
}

impl ParsedReference {
    /// A citation without a year anchor: everything goes into the title.
    pub(crate) fn unanchored(text: String) -> Self {
        Self {
            authors: NOT_MENTIONED.to_string(),
            year: CompactString::const_new(NOT_MENTIONED),
            title: text,
            meta: String::new(),
            kind: ReferenceKind::Other,
        }
    }

    pub fn has_authors(&self) -> bool {
        self.authors != NOT_MENTIONED
    }

    pub fn has_year(&self) -> bool {
        self.year != NOT_MENTIONED
    }
}

/// Trait for turning a converted issue document into article records.
pub trait DocumentParser {
    /// Parse the full text of one issue.
    ///
    /// # Arguments
    ///
    /// * `input` - The converted document body
    ///
    /// # Returns
    ///
    /// The ordered article records with their diagnostics, or an [`ExtractionError`]
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError` if the input holds no article blocks at all
    fn parse(&self, input: &str) -> Result<IssueExtraction>;
}
