//! Extraction options and configuration.

use crate::analysis::DEFAULT_THRESHOLD_MULTIPLIER;

/// Default maximum number of pages processed per document.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Options for inferring document structure.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Multiplier on the average size count that body text must exceed
    pub threshold_multiplier: f64,

    /// Documents with more pages than this are rejected
    pub max_pages: u32,

    /// How per-page ingestion failures are handled
    pub error_mode: ErrorMode,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body-size threshold multiplier.
    pub fn with_threshold_multiplier(mut self, multiplier: f64) -> Self {
        self.threshold_multiplier = multiplier;
        self
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be decoded).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            threshold_multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            max_pages: DEFAULT_MAX_PAGES,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Error handling mode during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    #[default]
    Strict,
    /// Treat unreadable pages as empty and continue
    Lenient,
}
