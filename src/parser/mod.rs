//! PDF ingestion: turns a PDF file into positioned text blocks.

mod backend;
mod layout;
mod options;
mod pdf_parser;
mod source;

pub use backend::{
    decode_text_simple, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue, DEFAULT_PAGE_SIZE,
};
pub use layout::{GlyphRun, LayoutAnalyzer};
pub use options::{ErrorMode, ExtractOptions, DEFAULT_MAX_PAGES};
pub use pdf_parser::PdfParser;
pub use source::{BlockSource, MemorySource};
