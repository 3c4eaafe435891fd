//! Whole-issue driver tying the segmenter, the article extractor and the reference
//! parser together.
//!
//! # Example
//!
//! ```
//! use issuebib::{DocumentParser, IssueExtractor};
//!
//! let text = "Ivanov I.I. 2024. Ground beetles // Euroasian Entomological Journal. P.7-15.
//! Novosibirsk, Russia
//! doi: 10.15298/euroasentj.23.03.01
//! Abstract. Short.
//! Key words: Carabidae.
//! <<<>>>";
//!
//! let extraction = IssueExtractor::new().parse(text).unwrap();
//! assert_eq!(extraction.first_doi(), Some("10.15298/euroasentj.23.03.01"));
//! assert!(extraction.diagnostics.is_empty());
//! ```

use crate::article::extract_article;
use crate::config::ExtractorConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::doi::IssueDoi;
use crate::reference;
use crate::segment::segment;
use crate::{ArticleBlock, ArticleRecord, DocumentParser, ExtractionError, ParsedReference, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Articles of one issue and everything that went wrong while extracting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueExtraction {
    /// Records in source order
    pub articles: Vec<ArticleRecord>,
    pub diagnostics: Diagnostics,
}

impl IssueExtraction {
    /// The first non-empty article DOI, used to look up the issue in the catalog.
    pub fn first_doi(&self) -> Option<&str> {
        self.articles
            .iter()
            .map(|article| article.doi.as_str())
            .find(|doi| !doi.is_empty())
    }

    /// [`first_doi`](Self::first_doi) decoded into journal, volume and issue.
    pub fn issue_doi(&self) -> Option<IssueDoi> {
        self.first_doi().and_then(IssueDoi::parse)
    }
}

/// Extractor for journal issues converted to plain text.
///
/// Holds one compiled [`ExtractorConfig`] and nothing else, so a single instance
/// can serve any number of documents.
#[derive(Debug, Clone, Default)]
pub struct IssueExtractor {
    config: ExtractorConfig,
}

impl IssueExtractor {
    /// Creates an extractor with the built-in patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuebib::IssueExtractor;
    /// let extractor = IssueExtractor::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Cut `text` into article blocks without extracting anything.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<ArticleBlock<'a>> {
        segment(text, &self.config)
    }

    /// Extract one block; `index` is the 1-based article position.
    pub fn extract_article(
        &self,
        block: &ArticleBlock<'_>,
        index: usize,
    ) -> (ArticleRecord, Vec<Diagnostic>) {
        extract_article(block, index, &self.config)
    }

    pub fn parse_reference(&self, raw: &str) -> ParsedReference {
        reference::parse_reference(raw, &self.config)
    }

    /// Run the whole pipeline over one issue.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::EmptyInput` for blank input and
    /// `ExtractionError::NoArticles` when no reference section delimiters are found.
    pub fn extract(&self, text: &str) -> Result<IssueExtraction> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        let blocks = self.segment(text);
        if blocks.is_empty() {
            return Err(ExtractionError::NoArticles);
        }

        let results = self.extract_blocks(&blocks);
        let mut extraction = IssueExtraction {
            articles: Vec::with_capacity(results.len()),
            diagnostics: Diagnostics::new(),
        };
        for (record, diagnostics) in results {
            extraction.diagnostics.extend(diagnostics);
            extraction.articles.push(record);
        }
        debug!(
            articles = extraction.articles.len(),
            diagnostics = extraction.diagnostics.len(),
            "extracted issue"
        );
        Ok(extraction)
    }

    #[cfg(feature = "parallel")]
    fn extract_blocks(&self, blocks: &[ArticleBlock<'_>]) -> Vec<(ArticleRecord, Vec<Diagnostic>)> {
        use rayon::prelude::*;

        if self.config.run_in_parallel() {
            blocks
                .par_iter()
                .enumerate()
                .map(|(i, block)| extract_article(block, i + 1, &self.config))
                .collect()
        } else {
            self.extract_sequential(blocks)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn extract_blocks(&self, blocks: &[ArticleBlock<'_>]) -> Vec<(ArticleRecord, Vec<Diagnostic>)> {
        self.extract_sequential(blocks)
    }

    fn extract_sequential(
        &self,
        blocks: &[ArticleBlock<'_>],
    ) -> Vec<(ArticleRecord, Vec<Diagnostic>)> {
        blocks
            .iter()
            .enumerate()
            .map(|(i, block)| extract_article(block, i + 1, &self.config))
            .collect()
    }
}

impl DocumentParser for IssueExtractor {
    /// Parses the full text of one converted issue.
    ///
    /// # Arguments
    ///
    /// * `input` - The converted document body with `<<<`/`>>>` reference sections
    ///
    /// # Returns
    ///
    /// The article records in source order with their diagnostics
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError` if the input is blank or holds no article blocks
    fn parse(&self, input: &str) -> Result<IssueExtraction> {
        self.extract(input)
    }
}
