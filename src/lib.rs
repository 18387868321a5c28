//! # pdfoutline
//!
//! Infers a document's title and heading outline (H1–H4) from the font sizes
//! of its text.
//!
//! No tagged structure or embedded bookmarks are needed: the most frequent
//! font size is treated as body text, the largest as the title, and the sizes
//! in between as headings, nested by a size stack in reading order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_structure, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let structure = extract_structure("document.pdf")?;
//!
//!     println!("{}", structure.title);
//!     for entry in &structure.outline {
//!         println!("{} {} (page {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&structure, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font role classification**: title, heading and body sizes from a histogram
//! - **Heading filtering**: paragraphs, list items and numbers are excluded
//! - **Outline nesting**: up to four levels, driven by relative font size
//! - **Any block source**: run the engine on PDFs or on pre-extracted blocks
//! - **Batch mode**: parallel directory processing with Rayon

pub mod analysis;
pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use analysis::{FontRoles, FontSizeHistogram};
pub use batch::{BatchOutcome, BatchProcessor, BatchReport};
pub use error::{Error, Result};
pub use model::{
    BBox, DocumentStructure, HeadingLevel, Line, OutlineEntry, Span, StructureResult, TextBlock,
};
pub use parser::{BlockSource, ErrorMode, ExtractOptions, MemorySource, PdfParser};
pub use render::JsonFormat;
pub use structure::{analyze_fonts, FontAnalysis, StructureExtractor};

use std::io::Read;
use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_structure;
///
/// let structure = extract_structure("document.pdf").unwrap();
/// println!("Headings: {}", structure.outline.len());
/// ```
pub fn extract_structure<P: AsRef<Path>>(path: P) -> Result<DocumentStructure> {
    extract_structure_with_options(path, &ExtractOptions::default())
}

/// Extract the title and outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_structure_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new()
///     .with_threshold_multiplier(1.5)
///     .lenient();
/// let structure = extract_structure_with_options("document.pdf", &options).unwrap();
/// ```
pub fn extract_structure_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<DocumentStructure> {
    let parser = PdfParser::open_with_mode(path, options.error_mode)?;
    StructureExtractor::new(options.clone()).extract(&parser)
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_structure_bytes(data: &[u8]) -> Result<DocumentStructure> {
    let parser = PdfParser::from_bytes(data)?;
    StructureExtractor::default().extract(&parser)
}

/// Extract the title and outline of a PDF read from a reader.
pub fn extract_structure_reader<R: Read>(reader: R) -> Result<DocumentStructure> {
    let parser = PdfParser::from_reader(reader)?;
    StructureExtractor::default().extract(&parser)
}

/// Extract a PDF's structure, folding any failure into the error shape.
///
/// Never fails: errors become `StructureResult::Failure` carrying the error
/// message.
pub fn structure_result<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> StructureResult {
    let path = path.as_ref();
    let result = extract_structure_with_options(path, options);
    match &result {
        Err(e) if e.is_open_failure() => log::warn!("Cannot open {}: {}", path.display(), e),
        Err(e) => log::warn!("Error processing {}: {}", path.display(), e),
        Ok(_) => {}
    }
    StructureResult::from(result)
}

/// Builder for structure extraction.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::Outliner;
///
/// let structure = Outliner::new()
///     .with_max_pages(100)
///     .lenient()
///     .extract("document.pdf")
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    options: ExtractOptions,
}

impl Outliner {
    /// Create a new outliner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body-size threshold multiplier.
    pub fn with_threshold_multiplier(mut self, multiplier: f64) -> Self {
        self.options = self.options.with_threshold_multiplier(multiplier);
        self
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.options = self.options.with_max_pages(pages);
        self
    }

    /// Treat pages whose content cannot be decoded as empty.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract the structure of a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<DocumentStructure> {
        extract_structure_with_options(path, &self.options)
    }

    /// Extract the structure of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentStructure> {
        let parser = PdfParser::from_bytes_with_mode(data, self.options.error_mode)?;
        self.extract_source(&parser)
    }

    /// Extract the structure from any block source.
    pub fn extract_source<S: BlockSource>(&self, source: &S) -> Result<DocumentStructure> {
        StructureExtractor::new(self.options.clone()).extract(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .with_threshold_multiplier(3.0)
            .with_max_pages(10)
            .lenient();

        assert_eq!(outliner.options().threshold_multiplier, 3.0);
        assert_eq!(outliner.options().max_pages, 10);
        assert_eq!(outliner.options().error_mode, ErrorMode::Lenient);
    }

    #[test]
    fn test_extract_bytes_not_pdf() {
        let result = extract_structure_bytes(b"hello world, not a pdf");
        assert!(matches!(result, Err(Error::Open(_))));
    }

    #[test]
    fn test_structure_result_missing_file() {
        let result = structure_result("/nonexistent/missing.pdf", &ExtractOptions::default());
        assert!(result.is_error());
        assert!(result
            .error()
            .unwrap()
            .starts_with("Failed to open PDF: "));
    }

    #[test]
    fn test_outliner_extract_source() {
        let source = MemorySource::new(vec![vec![]]);
        let structure = Outliner::new().extract_source(&source).unwrap();
        assert_eq!(structure, DocumentStructure::empty_document());
    }
}
