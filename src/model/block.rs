//! Ingested page content: blocks, lines and spans.

use serde::{Deserialize, Serialize};

/// Round a raw font size to the integer key used for classification.
///
/// Halfway values round to the even neighbour (`10.5 -> 10`, `11.5 -> 12`) so
/// sub-pixel rendering noise does not split one visual size into two keys.
pub fn round_size(size: f32) -> i32 {
    (size as f64).round_ties_even() as i32
}

/// A run of text sharing one font size within a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }

    /// Font size rounded to its classification key.
    pub fn rounded_size(&self) -> i32 {
        round_size(self.size)
    }
}

/// An ordered sequence of spans on one visual line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in left-to-right order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Span texts concatenated without a separator, then trimmed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

/// Axis-aligned bounding box with a top-left origin (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y0
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A visually grouped unit of lines, as produced by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Page number (1-indexed)
    pub page: u32,
    /// Bounding box on the page
    pub bbox: BBox,
    /// Lines in reading order
    pub lines: Vec<Line>,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(page: u32, bbox: BBox, lines: Vec<Line>) -> Self {
        Self { page, bbox, lines }
    }

    /// Whether the block has a first line with at least one span.
    ///
    /// Blocks failing this check are discarded at ingestion and contribute
    /// nothing, not even to the font histogram.
    pub fn is_well_formed(&self) -> bool {
        self.lines
            .first()
            .map(|l| !l.spans.is_empty())
            .unwrap_or(false)
    }

    /// The first span of the first line, which represents the whole block.
    pub fn first_span(&self) -> Option<&Span> {
        self.lines.first().and_then(|l| l.spans.first())
    }

    /// Rounded size of the representative span.
    pub fn representative_size(&self) -> Option<i32> {
        self.first_span().map(Span::rounded_size)
    }

    /// Iterate over every span in the block.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Normalized block text.
    ///
    /// Lines are joined with a single space, the result is trimmed, and
    /// doubled spaces are collapsed in one non-overlapping pass.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .replace("  ", " ")
    }
}
