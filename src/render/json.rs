//! JSON rendering for structure results.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// Indentation used by [`JsonFormat::Pretty`].
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 4-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to a JSON string.
///
/// Non-ASCII text is written verbatim, not as `\u` escapes.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, value, format)?;
    String::from_utf8(buf).map_err(|e| Error::Render(format!("JSON output is not UTF-8: {}", e)))
}

/// Serialize a value as JSON into a writer.
pub fn write_json<W, T>(writer: W, value: &T, format: JsonFormat) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let result = match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut ser = Serializer::with_formatter(writer, formatter);
            value.serialize(&mut ser)
        }
        JsonFormat::Compact => serde_json::to_writer(writer, value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentStructure, HeadingLevel, OutlineEntry, StructureResult};

    fn sample() -> StructureResult {
        StructureResult::Structure(DocumentStructure::new(
            "Überblick der Lösungen",
            vec![OutlineEntry::new(HeadingLevel::H1, "Einführung", 1)],
        ))
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = "{\n    \"title\": \"Überblick der Lösungen\",\n    \"outline\": [\n        {\n            \"level\": \"H1\",\n            \"text\": \"Einführung\",\n            \"page\": 1\n        }\n    ]\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"level\":\"H1\""));
    }

    #[test]
    fn test_error_result_json() {
        let result = StructureResult::Failure {
            error: "PDF exceeds the 50-page limit.".to_string(),
        };
        let json = to_json(&result, JsonFormat::Pretty).unwrap();
        assert_eq!(json, "{\n    \"error\": \"PDF exceeds the 50-page limit.\"\n}");
    }
}
