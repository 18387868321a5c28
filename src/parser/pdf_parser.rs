//! PDF document parser using lopdf.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TextBlock;

use super::backend::LopdfBackend;
use super::layout::LayoutAnalyzer;
use super::options::ErrorMode;
use super::source::BlockSource;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// PDF document parser.
///
/// Opens a document and serves its text blocks page by page.
pub struct PdfParser {
    backend: LopdfBackend,
    error_mode: ErrorMode,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_mode(path, ErrorMode::default())
    }

    /// Open a PDF file with the given page error mode.
    ///
    /// Any failure to read the document is reported as [`Error::Open`].
    pub fn open_with_mode<P: AsRef<Path>>(path: P, error_mode: ErrorMode) -> Result<Self> {
        Self::load_file(path.as_ref(), error_mode).map_err(Error::into_open_failure)
    }

    fn load_file(path: &Path, error_mode: ErrorMode) -> Result<Self> {
        let mut header = Vec::with_capacity(16);
        File::open(path)?.take(16).read_to_end(&mut header)?;
        check_header(&header)?;

        let backend = LopdfBackend::load_file(path)?;
        Self::with_backend(backend, error_mode)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_mode(data, ErrorMode::default())
    }

    /// Parse a PDF from bytes with the given page error mode.
    pub fn from_bytes_with_mode(data: &[u8], error_mode: ErrorMode) -> Result<Self> {
        Self::load_bytes(data, error_mode).map_err(Error::into_open_failure)
    }

    fn load_bytes(data: &[u8], error_mode: ErrorMode) -> Result<Self> {
        check_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Self::with_backend(backend, error_mode)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_mode(reader, ErrorMode::default())
    }

    /// Parse a PDF from a reader with the given page error mode.
    pub fn from_reader_with_mode<R: Read>(mut reader: R, error_mode: ErrorMode) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::from(e).into_open_failure())?;
        Self::from_bytes_with_mode(&data, error_mode)
    }

    fn with_backend(backend: LopdfBackend, error_mode: ErrorMode) -> Result<Self> {
        // lopdf 0.34 cannot decrypt, so encrypted content would decode as noise.
        if backend.is_encrypted() {
            return Err(Error::Open("document is encrypted".to_string()));
        }
        Ok(Self {
            backend,
            error_mode,
        })
    }

    /// Page error mode in effect.
    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }
}

impl BlockSource for PdfParser {
    fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    fn page_blocks(&self, page: u32) -> Result<Vec<TextBlock>> {
        let analyzer = LayoutAnalyzer::new(&self.backend);
        match analyzer.extract_page_blocks(page) {
            Ok(blocks) => Ok(blocks),
            Err(e @ Error::PageOutOfRange(..)) => Err(e),
            Err(e) if self.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", page, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Verify the `%PDF-x.y` header.
fn check_header(data: &[u8]) -> Result<()> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(())
}

/// Check that a version string looks like `1.0`..`2.9`.
fn is_valid_version(version: &str) -> bool {
    let mut chars = version.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('1' | '2'), Some('.'), Some(d)) if d.is_ascii_digit()
    )
}
