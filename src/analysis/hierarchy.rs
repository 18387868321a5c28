//! Outline level assignment from heading sizes in reading order.

use crate::model::{HeadingCandidate, HeadingLevel, OutlineEntry};

/// Stack of currently open heading sizes, largest at the bottom.
///
/// The stack is strictly decreasing from bottom to top, so its depth never
/// exceeds the number of distinct heading sizes.
#[derive(Debug, Clone, Default)]
pub struct NestingStack {
    sizes: Vec<i32>,
}

impl NestingStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next heading size and return its level.
    ///
    /// A larger size closes every open level below it. A smaller size opens
    /// a new level. An equal size stays at the current level.
    pub fn push_size(&mut self, size: i32) -> HeadingLevel {
        while self.sizes.last().is_some_and(|&top| size > top) {
            self.sizes.pop();
        }

        match self.sizes.last() {
            Some(&top) if size == top => {}
            _ => self.sizes.push(size),
        }

        HeadingLevel::from_depth(self.sizes.len())
    }

    /// Current number of open levels (unclamped).
    pub fn depth(&self) -> usize {
        self.sizes.len()
    }
}

/// Assign a level to each candidate, preserving order.
pub fn build_outline(candidates: &[HeadingCandidate]) -> Vec<OutlineEntry> {
    let mut stack = NestingStack::new();
    candidates
        .iter()
        .map(|c| OutlineEntry::new(stack.push_size(c.font_size), c.text.clone(), c.page))
        .collect()
}

/// Levels for a bare sequence of sizes.
pub fn assign_levels(sizes: &[i32]) -> Vec<HeadingLevel> {
    let mut stack = NestingStack::new();
    sizes.iter().map(|&s| stack.push_size(s)).collect()
}
