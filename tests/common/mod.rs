//! Shared helpers for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdfoutline::{BBox, Line, Span, TextBlock};

/// Text placed at `(x, baseline_y)` with a font size, in PDF user space.
pub type Placed<'a> = (f32, f32, f32, &'a str);

/// Build a PDF with one Helvetica text object per placed string.
pub fn build_pdf(pages: &[Vec<Placed<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for items in pages {
        let mut operations = Vec::new();
        for &(x, y, size, text) in items {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Six lines of 10pt body text starting at `top_y`, 12pt apart.
pub fn body_lines(top_y: f32) -> Vec<Placed<'static>> {
    (0..6)
        .map(|i| {
            (
                72.0,
                top_y - i as f32 * 12.0,
                10.0,
                "The quick brown fox jumps over the lazy dog",
            )
        })
        .collect()
}

/// A three-page report with a title, two H1 sections and one H2.
pub fn sample_report() -> Vec<u8> {
    let mut page1 = vec![
        (72.0, 720.0, 24.0, "Quarterly Results Overview"),
        (72.0, 660.0, 16.0, "Introduction"),
    ];
    page1.extend(body_lines(630.0));

    let mut page2 = vec![(72.0, 720.0, 13.0, "Background and Motivation")];
    page2.extend(body_lines(690.0));
    page2.push((72.0, 500.0, 16.0, "2. Numbered list entry"));

    let mut page3 = vec![(72.0, 720.0, 16.0, "Conclusion")];
    page3.extend(body_lines(690.0));

    build_pdf(&[page1, page2, page3])
}

/// A single-line block with one span.
pub fn block(page: u32, top: f32, size: f32, text: &str) -> TextBlock {
    TextBlock::new(
        page,
        BBox::new(72.0, top, 540.0, top + size),
        vec![Line::new(vec![Span::new(text, size)])],
    )
}

/// `count` single-line body blocks at 10pt.
pub fn body_blocks(page: u32, count: usize) -> Vec<TextBlock> {
    (0..count)
        .map(|i| {
            block(
                page,
                200.0 + i as f32 * 14.0,
                10.0,
                "Body paragraph text continues here",
            )
        })
        .collect()
}
