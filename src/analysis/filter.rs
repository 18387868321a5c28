//! Heading candidate filtering.
//!
//! Blocks are classified one at a time, in reading order. Each block is
//! either title text, a heading candidate, a rejected heading (with a tagged
//! reason) or plain body content.

use regex::Regex;

use crate::model::{HeadingCandidate, TextBlock};

use super::fonts::FontRoles;

/// Title blocks must be longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 15;

/// Blocks with more lines than this are paragraphs, not headings.
pub const MAX_HEADING_LINES: usize = 3;

/// Headings must have at least this many characters.
pub const MIN_HEADING_CHARS: usize = 3;

/// Kind of list marker that disqualifies a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `12.` or `3.Intro`
    Numbered,
    /// `(a)` or `(iv)` or `(3)`
    Parenthesized,
    /// `•`
    Bullet,
    /// `-`
    Dash,
    /// `A. `
    Lettered,
}

/// Why a heading-sized block was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// More than [`MAX_HEADING_LINES`] lines
    Paragraph,
    /// Ends with `.` or `:`
    TrailingPunctuation,
    /// Fewer than [`MIN_HEADING_CHARS`] characters
    TooShort,
    /// Only digits
    Numeric,
    /// Starts like a list item
    ListItem(ListMarker),
}

/// Outcome of classifying one block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockRole {
    /// No text after normalization
    Empty,
    /// Page-1 block at the title size
    Title(String),
    /// Accepted heading candidate
    Heading(HeadingCandidate),
    /// Heading-sized block that failed a candidacy check
    Rejected(RejectReason),
    /// Anything else
    Body,
}

/// Ordered list-item predicates, checked against the start of the text.
#[derive(Debug, Clone)]
pub struct ListPatterns {
    patterns: Vec<(ListMarker, Regex)>,
}

impl ListPatterns {
    /// Compile the default patterns.
    pub fn new() -> Self {
        let patterns = [
            (ListMarker::Numbered, r"^\d+\.\s*"),
            (ListMarker::Parenthesized, r"^\([a-z0-9]+\)"),
            (ListMarker::Bullet, r"^•"),
            (ListMarker::Dash, r"^-"),
            (ListMarker::Lettered, r"^[A-Z]\.\s"),
        ]
        .into_iter()
        .map(|(marker, pattern)| {
            let re = Regex::new(pattern).expect("list pattern is a valid regex");
            (marker, re)
        })
        .collect();

        Self { patterns }
    }

    /// First list marker that matches the start of `text`.
    pub fn matches(&self, text: &str) -> Option<ListMarker> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(marker, _)| *marker)
    }
}

impl Default for ListPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies blocks against a fixed set of font roles.
#[derive(Debug, Clone)]
pub struct HeadingFilter<'a> {
    roles: &'a FontRoles,
    list_patterns: ListPatterns,
}

impl<'a> HeadingFilter<'a> {
    /// Create a filter for the given roles.
    pub fn new(roles: &'a FontRoles) -> Self {
        Self {
            roles,
            list_patterns: ListPatterns::new(),
        }
    }

    /// Classify a single block. First matching rule wins.
    pub fn classify(&self, block: &TextBlock) -> BlockRole {
        let text = block.text();
        if text.is_empty() {
            return BlockRole::Empty;
        }

        let Some(size) = block.representative_size() else {
            return BlockRole::Empty;
        };

        let char_count = text.chars().count();

        if block.page == 1 && size == self.roles.title_size && char_count > MIN_TITLE_CHARS {
            return BlockRole::Title(text);
        }

        if self.roles.is_heading_size(size) {
            return match self.check_candidate(block, &text, char_count) {
                Some(reason) => BlockRole::Rejected(reason),
                None => BlockRole::Heading(HeadingCandidate::new(
                    text,
                    size,
                    block.page,
                    block.bbox.top(),
                )),
            };
        }

        BlockRole::Body
    }

    /// Run the candidacy checks in order, returning the first failure.
    fn check_candidate(
        &self,
        block: &TextBlock,
        text: &str,
        char_count: usize,
    ) -> Option<RejectReason> {
        if block.lines.len() > MAX_HEADING_LINES {
            return Some(RejectReason::Paragraph);
        }
        if text.ends_with('.') || text.ends_with(':') {
            return Some(RejectReason::TrailingPunctuation);
        }
        if char_count < MIN_HEADING_CHARS {
            return Some(RejectReason::TooShort);
        }
        if text.chars().all(is_digit) {
            return Some(RejectReason::Numeric);
        }
        self.list_patterns.matches(text).map(RejectReason::ListItem)
    }

    /// Classify every block in order, splitting title texts from candidates.
    pub fn partition<'b, I>(&self, blocks: I) -> FilterOutput
    where
        I: IntoIterator<Item = &'b TextBlock>,
    {
        let mut output = FilterOutput::default();
        for block in blocks {
            match self.classify(block) {
                BlockRole::Title(text) => output.title_texts.push(text),
                BlockRole::Heading(candidate) => output.candidates.push(candidate),
                BlockRole::Rejected(reason) => {
                    log::trace!("Rejected heading on page {}: {:?}", block.page, reason);
                    output.rejected += 1;
                }
                BlockRole::Empty | BlockRole::Body => {}
            }
        }
        output
    }
}

/// Title texts and heading candidates, both in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutput {
    pub title_texts: Vec<String>,
    pub candidates: Vec<HeadingCandidate>,
    /// Heading-sized blocks that failed a candidacy check
    pub rejected: usize,
}

/// First code point of each run of ten decimal digits outside ASCII.
const DIGIT_ZEROS: &[u32] = &[
    0x0660, 0x06F0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x17E0, 0x1810, 0x2080, 0xFF10,
];

/// Whether `c` is a digit: decimal digits of any script, plus superscript
/// and circled digits. Fractions, roman numerals and CJK numerals are not.
fn is_digit(c: char) -> bool {
    let code = c as u32;
    c.is_ascii_digit()
        || matches!(c, '\u{00B2}' | '\u{00B3}' | '\u{00B9}' | '\u{2070}')
        || (0x2074..=0x2079).contains(&code)
        || (0x2460..=0x2468).contains(&code)
        || DIGIT_ZEROS
            .iter()
            .any(|&zero| (zero..zero + 10).contains(&code))
}
