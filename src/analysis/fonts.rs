//! Font size statistics and role classification.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{round_size, TextBlock};

/// Default multiplier applied to the average count when looking for body text.
pub const DEFAULT_THRESHOLD_MULTIPLIER: f64 = 2.0;

/// Occurrence count of every rounded font size in a document.
///
/// Built once by [`FontSizeHistogram::from_blocks`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontSizeHistogram {
    counts: BTreeMap<i32, usize>,
    /// Sizes in the order they were first observed.
    first_seen: Vec<i32>,
}

impl FontSizeHistogram {
    /// Tabulate every span of every block, in order.
    pub fn from_blocks<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a TextBlock>,
    {
        Self::from_sizes(blocks.into_iter().flat_map(|b| b.spans().map(|s| s.size)))
    }

    /// Tabulate raw (unrounded) sizes.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Self {
        Self::from_rounded(sizes.into_iter().map(round_size))
    }

    /// Tabulate already-rounded sizes.
    pub fn from_rounded<I: IntoIterator<Item = i32>>(sizes: I) -> Self {
        let mut counts = BTreeMap::new();
        let mut first_seen = Vec::new();
        for size in sizes {
            let count = counts.entry(size).or_insert(0usize);
            if *count == 0 {
                first_seen.push(size);
            }
            *count += 1;
        }
        Self { counts, first_seen }
    }

    /// Build from explicit `(size, count)` pairs. Zero counts are skipped.
    pub fn from_counts<I: IntoIterator<Item = (i32, usize)>>(pairs: I) -> Self {
        let mut hist = Self::default();
        for (size, count) in pairs {
            if count == 0 {
                continue;
            }
            let slot = hist.counts.entry(size).or_insert(0);
            if *slot == 0 {
                hist.first_seen.push(size);
            }
            *slot += count;
        }
        hist
    }

    /// Whether no span was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct sizes.
    pub fn distinct_sizes(&self) -> usize {
        self.counts.len()
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Count for a size.
    pub fn count(&self, size: i32) -> usize {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// Largest observed size.
    pub fn largest(&self) -> Option<i32> {
        self.counts.keys().next_back().copied()
    }

    /// Most frequent size; ties go to the size observed first.
    pub fn most_frequent(&self) -> Option<(i32, usize)> {
        let mut best: Option<(i32, usize)> = None;
        for &size in &self.first_seen {
            let count = self.count(size);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((size, count));
            }
        }
        best
    }

    /// Sizes in descending order.
    pub fn sizes_descending(&self) -> impl Iterator<Item = i32> + '_ {
        self.counts.keys().rev().copied()
    }
}

/// Font sizes assigned to the title, heading and body roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontRoles {
    /// Largest size in the document
    pub title_size: i32,
    /// Sizes between body and title, largest first
    pub heading_sizes: Vec<i32>,
    /// Dominant size, or 0 when no size clearly dominates
    pub body_size: i32,
}

impl FontRoles {
    /// Derive roles from a histogram.
    ///
    /// The most frequent size is body text only if its count exceeds
    /// `average * threshold_multiplier`. A single-size histogram makes that
    /// size both title and body.
    pub fn classify(histogram: &FontSizeHistogram, threshold_multiplier: f64) -> Self {
        let Some(title_size) = histogram.largest() else {
            return Self::default();
        };

        if histogram.distinct_sizes() == 1 {
            return Self {
                title_size,
                heading_sizes: Vec::new(),
                body_size: title_size,
            };
        }

        let average = histogram.total() as f64 / histogram.distinct_sizes() as f64;
        let body_threshold = average * threshold_multiplier;

        let body_size = match histogram.most_frequent() {
            Some((size, count)) if count as f64 > body_threshold => size,
            _ => 0,
        };

        let heading_sizes = histogram
            .sizes_descending()
            .filter(|&size| size > body_size && size != title_size)
            .collect();

        Self {
            title_size,
            heading_sizes,
            body_size,
        }
    }

    /// Whether a rounded size is a heading size.
    pub fn is_heading_size(&self, size: i32) -> bool {
        self.heading_sizes.contains(&size)
    }

    /// Whether a dominant body size was found.
    pub fn has_body(&self) -> bool {
        self.body_size != 0
    }
}
