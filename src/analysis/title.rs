//! Document title assembly.

use crate::model::UNTITLED;

/// Join qualifying page-1 title texts with single spaces.
///
/// Falls back to `"Untitled Document"` when nothing qualified.
pub fn aggregate_title<S: AsRef<str>>(texts: &[S]) -> String {
    if texts.is_empty() {
        return UNTITLED.to_string();
    }
    texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
