//! Structure extraction from real PDF files.

mod common;

use std::io::Cursor;

use common::{body_lines, build_pdf, sample_report};
use pdfoutline::model::EMPTY_DOCUMENT;
use pdfoutline::{
    extract_structure, extract_structure_bytes, extract_structure_reader, structure_result,
    BlockSource, Error, ExtractOptions, HeadingLevel, Outliner, PdfParser,
};
use tempfile::TempDir;

#[test]
fn test_sample_report_structure() {
    let structure = extract_structure_bytes(&sample_report()).unwrap();

    assert_eq!(structure.title, "Quarterly Results Overview");

    let outline: Vec<(HeadingLevel, &str, u32)> = structure
        .outline
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();
    assert_eq!(
        outline,
        vec![
            (HeadingLevel::H1, "Introduction", 1),
            (HeadingLevel::H2, "Background and Motivation", 2),
            (HeadingLevel::H1, "Conclusion", 3),
        ]
    );
}

#[test]
fn test_parser_blocks_in_reading_order() {
    let parser = PdfParser::from_bytes(&sample_report()).unwrap();
    assert_eq!(parser.page_count(), 3);

    let blocks = parser.page_blocks(1).unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].text(), "Quarterly Results Overview");
    assert_eq!(blocks[1].text(), "Introduction");
    assert_eq!(blocks[2].lines.len(), 6);
    assert!(blocks.iter().all(|b| b.page == 1));

    // Top-left origin: y grows downward through the page.
    assert!(blocks[0].bbox.y0 < blocks[1].bbox.y0);
    assert!(blocks[1].bbox.y0 < blocks[2].bbox.y0);
    assert!((blocks[0].bbox.y0 - (792.0 - 720.0 - 24.0 * 0.8)).abs() < 0.01);

    let first = blocks[0].first_span().unwrap();
    assert_eq!(first.size, 24.0);
}

#[test]
fn test_extract_from_file_and_reader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, sample_report()).unwrap();

    let from_file = extract_structure(&path).unwrap();
    let from_reader = extract_structure_reader(Cursor::new(sample_report())).unwrap();
    assert_eq!(from_file, from_reader);
    assert_eq!(from_file.outline.len(), 3);

    let result = structure_result(&path, &ExtractOptions::default());
    assert_eq!(result.structure(), Some(&from_file));
}

#[test]
fn test_blank_pdf_is_empty_document() {
    let pdf = build_pdf(&[vec![], vec![]]);
    let structure = extract_structure_bytes(&pdf).unwrap();
    assert_eq!(structure.title, EMPTY_DOCUMENT);
    assert!(structure.outline.is_empty());
}

#[test]
fn test_page_limit_on_real_pdf() {
    let pages: Vec<_> = (0..51).map(|_| body_lines(700.0)).collect();
    let pdf = build_pdf(&pages);

    let err = extract_structure_bytes(&pdf).unwrap_err();
    assert!(matches!(
        err,
        Error::PageLimitExceeded {
            pages: 51,
            limit: 50
        }
    ));
    assert_eq!(err.to_string(), "PDF exceeds the 50-page limit.");

    // A raised limit lets the same document through.
    let structure = Outliner::new().with_max_pages(60).extract_bytes(&pdf).unwrap();
    assert!(structure.outline.is_empty());
}

#[test]
fn test_not_a_pdf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, "plain text pretending to be a PDF").unwrap();

    let result = structure_result(&path, &ExtractOptions::default());
    assert_eq!(result.error(), Some("Failed to open PDF: not a valid PDF"));
}

#[test]
fn test_open_failures_share_one_shape() {
    let dir = TempDir::new().unwrap();
    let bad_version = dir.path().join("future.pdf");
    std::fs::write(&bad_version, "%PDF-9.9\n%%EOF\n").unwrap();
    let truncated = dir.path().join("truncated.pdf");
    let mut pdf = sample_report();
    pdf.truncate(40);
    std::fs::write(&truncated, pdf).unwrap();
    let missing = dir.path().join("missing.pdf");

    for path in [&bad_version, &truncated, &missing] {
        let result = structure_result(path, &ExtractOptions::default());
        let message = result.error().unwrap_or_default();
        assert!(
            message.starts_with("Failed to open PDF: "),
            "{}: {}",
            path.display(),
            message
        );
    }
}

#[test]
fn test_corrupt_pdf_is_open_failure() {
    let mut pdf = sample_report();
    pdf.truncate(40);

    let err = extract_structure_bytes(&pdf).unwrap_err();
    assert!(err.is_open_failure(), "unexpected error: {err}");
    assert!(err.to_string().starts_with("Failed to open PDF"));
}
