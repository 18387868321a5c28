//! Structure inference from font-size statistics.
//!
//! The stages run strictly forward: [`FontSizeHistogram`] →
//! [`FontRoles`] → [`HeadingFilter`] → [`build_outline`] and
//! [`aggregate_title`]. Each stage is a pure function of its input.

mod filter;
mod fonts;
mod hierarchy;
mod title;

pub use filter::{
    BlockRole, FilterOutput, HeadingFilter, ListMarker, ListPatterns, RejectReason,
    MAX_HEADING_LINES, MIN_HEADING_CHARS, MIN_TITLE_CHARS,
};
pub use fonts::{FontRoles, FontSizeHistogram, DEFAULT_THRESHOLD_MULTIPLIER};
pub use hierarchy::{assign_levels, build_outline, NestingStack};
pub use title::aggregate_title;
