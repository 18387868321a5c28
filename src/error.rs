//! Error types for pdfoutline.

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while inferring document structure.
///
/// Only [`Error::Open`] and [`Error::PageLimitExceeded`] are fatal for a
/// document once it reaches the structure engine; every heuristic stage is
/// total and degrades to empty or partial output instead of failing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a malformed version.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The source document could not be opened or parsed.
    #[error("Failed to open PDF: {0}")]
    Open(String),

    /// The document has more pages than the configured limit.
    #[error("PDF exceeds the {limit}-page limit.")]
    PageLimitExceeded {
        /// Pages reported by the document.
        pages: u32,
        /// Configured page limit.
        limit: u32,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A page's content stream could not be decoded.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error while serializing output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error means the document itself could not be read.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            Error::Open(_) | Error::UnknownFormat | Error::UnsupportedVersion(_)
        )
    }

    /// Fold a failure to read a document into [`Error::Open`], keeping the reason.
    ///
    /// Errors raised after the document is open pass through unchanged.
    pub fn into_open_failure(self) -> Error {
        match self {
            Error::Io(e) => Error::Open(e.to_string()),
            Error::UnknownFormat => Error::Open("not a valid PDF".to_string()),
            Error::UnsupportedVersion(v) => Error::Open(format!("unsupported PDF version {}", v)),
            other => other,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Open("document is encrypted".to_string()),
            _ => Error::Open(err.to_string()),
        }
    }
}
