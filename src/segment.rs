//! Splits a converted issue document into article blocks.
//!
//! Every article body is followed by its reference list wrapped in the configured
//! delimiters (`<<<` and `>>>` by default). One delimited pair is one block; text
//! after the last closing delimiter belongs to no article and is ignored.

use crate::ArticleBlock;
use crate::config::ExtractorConfig;
use tracing::{debug, warn};

/// Cut `text` into article blocks in document order.
///
/// Returns an empty vector when no delimited reference section exists.
pub(crate) fn segment<'a>(text: &'a str, config: &ExtractorConfig) -> Vec<ArticleBlock<'a>> {
    let mut blocks = Vec::new();
    let mut tail = 0;

    for caps in config.block_re.captures_iter(text) {
        let (Some(whole), Some(article), Some(references)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        tail = whole.end();
        blocks.push(ArticleBlock {
            article: article.as_str(),
            references: references.as_str(),
        });
    }

    let rest = &text[tail..];
    if !blocks.is_empty() && !rest.trim().is_empty() {
        warn!(
            bytes = rest.len(),
            "ignoring text after the last reference section"
        );
    }
    debug!(blocks = blocks.len(), "segmented document");
    blocks
}
