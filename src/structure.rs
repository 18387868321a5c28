//! Document structure extraction.
//!
//! Drives the analysis stages over any [`BlockSource`]: collect blocks,
//! tabulate font sizes, classify roles, filter candidates, then build the
//! title and the nested outline.

use serde::Serialize;

use crate::analysis::{aggregate_title, build_outline, FontRoles, FontSizeHistogram, HeadingFilter};
use crate::error::{Error, Result};
use crate::model::{DocumentStructure, TextBlock};
use crate::parser::{BlockSource, ExtractOptions};

/// Infers title and outline from a document's text blocks.
#[derive(Debug, Clone, Default)]
pub struct StructureExtractor {
    options: ExtractOptions,
}

impl StructureExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract the structure of a document.
    ///
    /// Fails only when the document exceeds the page limit or a page cannot
    /// be read. Every later stage degrades to partial output instead.
    pub fn extract<S: BlockSource>(&self, source: &S) -> Result<DocumentStructure> {
        let blocks = self.collect_blocks(source)?;
        Ok(self.structure_from_blocks(&blocks))
    }

    /// Gather well-formed blocks from every page, in reading order.
    pub fn collect_blocks<S: BlockSource>(&self, source: &S) -> Result<Vec<TextBlock>> {
        let pages = source.page_count();
        if pages > self.options.max_pages {
            return Err(Error::PageLimitExceeded {
                pages,
                limit: self.options.max_pages,
            });
        }

        let mut blocks = Vec::new();
        for page in 1..=pages {
            blocks.extend(
                source
                    .page_blocks(page)?
                    .into_iter()
                    .filter(TextBlock::is_well_formed),
            );
        }

        log::debug!("Collected {} blocks from {} pages", blocks.len(), pages);
        Ok(blocks)
    }

    /// Run the analysis stages over already-collected blocks.
    pub fn structure_from_blocks(&self, blocks: &[TextBlock]) -> DocumentStructure {
        let histogram = FontSizeHistogram::from_blocks(blocks);
        if histogram.is_empty() {
            return DocumentStructure::empty_document();
        }

        let roles = FontRoles::classify(&histogram, self.options.threshold_multiplier);
        log::debug!(
            "Font roles: title={} body={} headings={:?}",
            roles.title_size,
            roles.body_size,
            roles.heading_sizes
        );

        let filtered = HeadingFilter::new(&roles).partition(blocks);
        log::debug!(
            "{} title blocks, {} heading candidates, {} rejected",
            filtered.title_texts.len(),
            filtered.candidates.len(),
            filtered.rejected
        );

        DocumentStructure::new(
            aggregate_title(&filtered.title_texts),
            build_outline(&filtered.candidates),
        )
    }
}

/// Font statistics of a document, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontAnalysis {
    /// Pages read
    pub pages: u32,
    /// Well-formed blocks considered
    pub blocks: usize,
    pub histogram: FontSizeHistogram,
    pub roles: FontRoles,
}

/// Tabulate font sizes and derive roles without building an outline.
pub fn analyze_fonts<S: BlockSource>(source: &S, options: &ExtractOptions) -> Result<FontAnalysis> {
    let extractor = StructureExtractor::new(options.clone());
    let blocks = extractor.collect_blocks(source)?;
    let histogram = FontSizeHistogram::from_blocks(&blocks);
    let roles = FontRoles::classify(&histogram, options.threshold_multiplier);

    Ok(FontAnalysis {
        pages: source.page_count(),
        blocks: blocks.len(),
        histogram,
        roles,
    })
}
