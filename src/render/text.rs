//! Plain text rendering of document outlines.

use std::fmt::Write;

use crate::model::DocumentStructure;

/// Render a structure as an indented outline.
///
/// The title comes first, then one line per entry indented two spaces per
/// level below H1, with the page number at the end.
pub fn to_text(structure: &DocumentStructure) -> String {
    let mut output = String::new();
    output.push_str(&structure.title);
    output.push('\n');

    for entry in &structure.outline {
        let indent = "  ".repeat(entry.level.depth().saturating_sub(1) as usize);
        // Writing to a String cannot fail.
        let _ = writeln!(
            output,
            "{}{} {} (p. {})",
            indent, entry.level, entry.text, entry.page
        );
    }

    output.trim_end().to_string()
}
