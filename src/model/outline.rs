//! Outline and result types.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Title used when no page-1 block qualifies as title text.
pub const UNTITLED: &str = "Untitled Document";

/// Title reported for documents without a single span.
pub const EMPTY_DOCUMENT: &str = "Empty Document";

/// Outline depth, serialized as `"H1"` .. `"H4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Deepest level an outline can express.
    pub const MAX_DEPTH: usize = 4;

    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// Convert a nesting depth to a level, clamping anything deeper than 4.
    ///
    /// Depth 0 only occurs for an empty stack and maps to `H1`.
    pub fn from_depth(depth: usize) -> Self {
        match depth.min(Self::MAX_DEPTH) {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }

    /// Numeric depth (1-4).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A block provisionally identified as a structural heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Normalized heading text
    pub text: String,
    /// Rounded font size of the block's first span
    pub font_size: i32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Top of the block's bounding box
    pub y: f32,
}

impl HeadingCandidate {
    /// Create a heading candidate.
    pub fn new(text: impl Into<String>, font_size: i32, page: u32, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            page,
            y,
        }
    }
}

/// One entry of the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl OutlineEntry {
    /// Create an outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Inferred title and outline of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentStructure {
    /// Create a structure from its parts.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Structure reported for a document with no text at all.
    pub fn empty_document() -> Self {
        Self::new(EMPTY_DOCUMENT, Vec::new())
    }

    /// Number of outline entries at a given level.
    pub fn count_at(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}

/// Outbound result: either a structure or an error message.
///
/// Serializes to `{"title": .., "outline": [..]}` or `{"error": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureResult {
    Structure(DocumentStructure),
    Failure { error: String },
}

impl StructureResult {
    /// Whether this result carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, StructureResult::Failure { .. })
    }

    /// The structure, if extraction succeeded.
    pub fn structure(&self) -> Option<&DocumentStructure> {
        match self {
            StructureResult::Structure(s) => Some(s),
            StructureResult::Failure { .. } => None,
        }
    }

    /// The error message, if extraction failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            StructureResult::Structure(_) => None,
            StructureResult::Failure { error } => Some(error),
        }
    }
}

impl From<Result<DocumentStructure>> for StructureResult {
    fn from(result: Result<DocumentStructure>) -> Self {
        match result {
            Ok(structure) => StructureResult::Structure(structure),
            Err(e) => StructureResult::Failure {
                error: e.to_string(),
            },
        }
    }
}
