//! Data model shared by ingestion, analysis and rendering.
//!
//! Ingested content ([`TextBlock`], [`Line`], [`Span`]) flows into the
//! analysis stages, which produce [`HeadingCandidate`]s and finally a
//! [`DocumentStructure`]. Everything here is owned by a single
//! document-processing call.

mod block;
mod outline;

pub use block::{round_size, BBox, Line, Span, TextBlock};
pub use outline::{
    DocumentStructure, HeadingCandidate, HeadingLevel, OutlineEntry, StructureResult,
    EMPTY_DOCUMENT, UNTITLED,
};
