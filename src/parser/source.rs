//! The seam between page-content ingestion and structure inference.

use crate::error::{Error, Result};
use crate::model::TextBlock;

/// Supplies a document's text blocks page by page.
///
/// Implementations own everything format-specific: opening the document,
/// grouping glyphs into spans, lines and blocks, and sorting blocks into
/// reading order. The structure engine only sees the resulting
/// [`TextBlock`]s.
pub trait BlockSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Blocks of one page (1-indexed), in reading order.
    fn page_blocks(&self, page: u32) -> Result<Vec<TextBlock>>;
}

impl<S: BlockSource + ?Sized> BlockSource for &S {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_blocks(&self, page: u32) -> Result<Vec<TextBlock>> {
        (**self).page_blocks(page)
    }
}

/// In-memory block source, one `Vec<TextBlock>` per page.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<TextBlock>>,
    reported_pages: Option<u32>,
}

impl MemorySource {
    /// Create a source from per-page blocks.
    pub fn new(pages: Vec<Vec<TextBlock>>) -> Self {
        Self {
            pages,
            reported_pages: None,
        }
    }

    /// Report a page count different from the number of stored pages.
    ///
    /// Pages beyond the stored ones read as empty.
    pub fn with_reported_pages(mut self, pages: u32) -> Self {
        self.reported_pages = Some(pages);
        self
    }

    /// Append a page.
    pub fn push_page(&mut self, blocks: Vec<TextBlock>) {
        self.pages.push(blocks);
    }
}

impl BlockSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.reported_pages.unwrap_or(self.pages.len() as u32)
    }

    fn page_blocks(&self, page: u32) -> Result<Vec<TextBlock>> {
        let count = self.page_count();
        if page == 0 || page > count {
            return Err(Error::PageOutOfRange(page, count));
        }
        Ok(self
            .pages
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_default())
    }
}
