//! Layout analysis for PDF pages.
//!
//! Turns a page's content stream into [`TextBlock`]s: positioned glyph runs
//! are grouped into lines by baseline, same-size runs within a line become
//! [`Span`]s, and lines are grouped into blocks by spacing, size and
//! indentation. Blocks come out in reading order (top to bottom, then left
//! to right) with a top-left-origin bounding box.

use crate::error::{Error, Result};
use crate::model::{round_size, BBox, Line, Span, TextBlock};

use super::backend::{decode_text_simple, ContentOp, PageId, PdfBackend, PdfValue};

/// Approximate glyph width as a fraction of the font size.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Fraction of the font size above the baseline.
const ASCENT_RATIO: f32 = 0.8;

/// Fraction of the font size below the baseline.
const DESCENT_RATIO: f32 = 0.2;

/// TJ adjustments beyond this (thousandths of an em) read as word breaks.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A positioned piece of text from a single show operation.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, PDF user space: grows upward)
    pub y: f32,
    /// Estimated width
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl GlyphRun {
    fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A line of runs on a shared baseline, before conversion to the model.
#[derive(Debug, Clone)]
struct PositionedLine {
    spans: Vec<Span>,
    /// Leftmost X
    x: f32,
    /// Rightmost X
    right: f32,
    /// Baseline
    y: f32,
    /// Largest effective font size on the line
    font_size: f32,
}

impl PositionedLine {
    /// Build a line from runs on the same baseline.
    ///
    /// Consecutive runs with the same rounded size merge into one span. A
    /// space is inserted where the horizontal gap between runs suggests one.
    fn from_runs(mut runs: Vec<GlyphRun>) -> Self {
        runs.sort_by(|a, b| a.x.total_cmp(&b.x));

        let x = runs.first().map(|r| r.x).unwrap_or(0.0);
        let y = runs.first().map(|r| r.y).unwrap_or(0.0);
        let right = runs.iter().map(GlyphRun::right).fold(x, f32::max);
        let font_size = runs.iter().map(|r| r.font_size).fold(0.0, f32::max);

        let mut spans: Vec<Span> = Vec::new();
        let mut prev: Option<&GlyphRun> = None;

        for run in &runs {
            let mut text = String::new();
            if let Some(prev) = prev {
                if needs_space(prev, run) {
                    text.push(' ');
                }
            }
            text.push_str(&run.text);

            match spans.last_mut() {
                Some(last) if round_size(last.size) == round_size(run.font_size) => {
                    last.text.push_str(&text);
                }
                _ => spans.push(Span::new(text, run.font_size)),
            }
            prev = Some(run);
        }

        Self {
            spans,
            x,
            right,
            y,
            font_size,
        }
    }

    /// Bounding box with the origin at the top-left of the page.
    fn bbox(&self, page_height: f32) -> BBox {
        BBox::new(
            self.x,
            page_height - (self.y + self.font_size * ASCENT_RATIO),
            self.right,
            page_height - (self.y - self.font_size * DESCENT_RATIO),
        )
    }
}

/// Whether a space belongs between two runs on the same line.
fn needs_space(prev: &GlyphRun, curr: &GlyphRun) -> bool {
    let gap = curr.x - prev.right();

    let char_count = curr.text.chars().count();
    let avg_char_width = if char_count > 0 && curr.width > 0.0 {
        curr.width / char_count as f32
    } else {
        curr.font_size * APPROX_CHAR_WIDTH_RATIO
    };

    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_has_space = prev.text.ends_with(' ') || prev.text.ends_with('\u{00A0}');
    let curr_has_space = curr.text.starts_with(' ') || curr.text.starts_with('\u{00A0}');
    if prev_has_space || curr_has_space {
        return false;
    }

    let prev_cjk = prev
        .text
        .chars()
        .last()
        .map(is_spaceless_script_char)
        .unwrap_or(false);
    let curr_cjk = curr
        .text
        .chars()
        .next()
        .map(is_spaceless_script_char)
        .unwrap_or(false);

    !(prev_cjk && curr_cjk)
}

/// Affine matrix `[a b c d e f]`, used for both the text matrix and the CTM.
#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    fn from_op(op: &ContentOp) -> Self {
        Self {
            a: op.number(0, 1.0),
            b: op.number(1, 0.0),
            c: op.number(2, 0.0),
            d: op.number(3, 1.0),
            e: op.number(4, 0.0),
            f: op.number(5, 0.0),
        }
    }

    /// Pre-multiply by a translation in text space.
    fn translate(&self, tx: f32, ty: f32) -> Self {
        Self {
            e: tx * self.a + ty * self.c + self.e,
            f: tx * self.b + ty * self.d + self.f,
            ..*self
        }
    }

    /// `self × other`: apply `self` first, then `other`.
    fn multiply(&self, other: &Matrix) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text and graphics state while walking a content stream.
#[derive(Debug, Default)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    /// Current transformation matrix
    ctm: Matrix,
    /// CTMs saved by `q`
    saved_ctm: Vec<Matrix>,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    in_text_object: bool,
}

impl TextState {
    fn begin_text(&mut self) {
        self.in_text_object = true;
        self.matrix = Matrix::default();
        self.line_matrix = Matrix::default();
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = self.line_matrix.translate(tx, ty);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn save_graphics(&mut self) {
        self.saved_ctm.push(self.ctm);
    }

    /// Unbalanced `Q` keeps the current CTM.
    fn restore_graphics(&mut self) {
        if let Some(ctm) = self.saved_ctm.pop() {
            self.ctm = ctm;
        }
    }

    fn concat(&mut self, m: Matrix) {
        self.ctm = m.multiply(&self.ctm);
    }

    /// Record a run at the current position and advance past it.
    ///
    /// `extra_advance` is additional text-space displacement from TJ
    /// adjustments.
    fn show(&mut self, text: String, extra_advance: f32, runs: &mut Vec<GlyphRun>) {
        let char_count = text.chars().count() as f32;
        let advance = char_count * self.font_size * APPROX_CHAR_WIDTH_RATIO + extra_advance;

        if self.in_text_object && !text.trim().is_empty() {
            // Page space: text matrix followed by the CTM.
            let rendering = self.matrix.multiply(&self.ctm);
            let (x, y) = rendering.position();
            runs.push(GlyphRun {
                text,
                x,
                y,
                width: (advance * rendering.horizontal_scale()).max(0.0),
                font_size: self.font_size * rendering.vertical_scale(),
            });
        }

        self.matrix = self.matrix.translate(advance, 0.0);
    }
}

/// Layout analyzer for extracting text blocks from PDF pages.
pub struct LayoutAnalyzer<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    fn page_id(&self, page_num: u32) -> Result<PageId> {
        let pages = self.backend.pages();
        pages
            .get(&page_num)
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))
    }

    /// Extract positioned glyph runs from a page.
    pub fn extract_page_runs(&self, page_num: u32) -> Result<Vec<GlyphRun>> {
        let page_id = self.page_id(page_num)?;
        let content = self.backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let ops = self.backend.decode_content(&content)?;
        Ok(self.interpret(page_id, &ops))
    }

    /// Extract a page's text blocks in reading order.
    pub fn extract_page_blocks(&self, page_num: u32) -> Result<Vec<TextBlock>> {
        let page_id = self.page_id(page_num)?;
        let (_, page_height) = self.backend.page_size(page_id);

        let runs = self.extract_page_runs(page_num)?;
        let lines = group_runs_into_lines(runs);
        let mut blocks = group_lines_into_blocks(lines, page_num, page_height);

        blocks.sort_by(|a, b| {
            a.bbox
                .y0
                .total_cmp(&b.bbox.y0)
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });

        log::debug!("Page {}: {} blocks", page_num, blocks.len());
        Ok(blocks)
    }

    /// Walk content stream operations and collect glyph runs.
    fn interpret(&self, page_id: PageId, ops: &[ContentOp]) -> Vec<GlyphRun> {
        let mut state = TextState::default();
        let mut runs = Vec::new();

        for op in ops {
            match op.operator.as_str() {
                "q" => state.save_graphics(),
                "Q" => state.restore_graphics(),
                "cm" => state.concat(Matrix::from_op(op)),
                "BT" => state.begin_text(),
                "ET" => state.in_text_object = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        state.font_key = name.clone();
                    }
                    state.font_size = op.number(1, state.font_size);
                }
                "TL" => state.leading = op.number(0, state.leading),
                "Td" => state.move_line(op.number(0, 0.0), op.number(1, 0.0)),
                "TD" => {
                    let ty = op.number(1, 0.0);
                    state.leading = -ty;
                    state.move_line(op.number(0, 0.0), ty);
                }
                "Tm" => {
                    state.line_matrix = Matrix::from_op(op);
                    state.matrix = state.line_matrix;
                }
                "T*" => state.next_line(),
                "Tj" => {
                    let text = self.decode_operand(page_id, &state, op.operands.first());
                    state.show(text, 0.0, &mut runs);
                }
                "TJ" => {
                    if let Some(PdfValue::Array(items)) = op.operands.first() {
                        let (text, extra) = self.decode_tj_array(page_id, &state, items);
                        state.show(text, extra, &mut runs);
                    }
                }
                "'" => {
                    state.next_line();
                    let text = self.decode_operand(page_id, &state, op.operands.first());
                    state.show(text, 0.0, &mut runs);
                }
                "\"" => {
                    state.next_line();
                    let text = self.decode_operand(page_id, &state, op.operands.get(2));
                    state.show(text, 0.0, &mut runs);
                }
                _ => {}
            }
        }

        runs
    }

    fn decode_operand(
        &self,
        page_id: PageId,
        state: &TextState,
        operand: Option<&PdfValue>,
    ) -> String {
        match operand {
            Some(PdfValue::Str(bytes)) => self.decode_bytes(page_id, state, bytes),
            _ => String::new(),
        }
    }

    fn decode_bytes(&self, page_id: PageId, state: &TextState, bytes: &[u8]) -> String {
        let decoded = self.backend.decode_text(page_id, &state.font_key, bytes);
        if decoded.is_empty() && !bytes.is_empty() {
            decode_text_simple(bytes)
        } else {
            decoded
        }
    }

    /// Decode a TJ array into one string plus the total kerning advance.
    ///
    /// Numbers are in thousandths of text space; large negative values are
    /// word breaks.
    fn decode_tj_array(
        &self,
        page_id: PageId,
        state: &TextState,
        items: &[PdfValue],
    ) -> (String, f32) {
        let mut combined = String::new();
        let mut extra_advance = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode_bytes(page_id, state, bytes)),
                other => {
                    let Some(n) = other.as_number() else {
                        continue;
                    };
                    extra_advance -= n / 1000.0 * state.font_size;
                    let word_break = -n > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}');
                    if word_break {
                        if let Some(c) = combined.chars().last() {
                            if !is_spaceless_script_char(c) {
                                combined.push(' ');
                            }
                        }
                    }
                }
            }
        }

        (combined, extra_advance)
    }
}

/// Group runs into lines by baseline, top of the page first.
fn group_runs_into_lines(mut runs: Vec<GlyphRun>) -> Vec<PositionedLine> {
    if runs.is_empty() {
        return Vec::new();
    }

    // PDF y grows upward, so descending y is top to bottom.
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<GlyphRun> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let tolerance = run.font_size * 0.3;
        match current_y {
            Some(y) if (run.y - y).abs() <= tolerance => current.push(run),
            _ => {
                if !current.is_empty() {
                    lines.push(PositionedLine::from_runs(std::mem::take(&mut current)));
                }
                current_y = Some(run.y);
                current.push(run);
            }
        }
    }

    if !current.is_empty() {
        lines.push(PositionedLine::from_runs(current));
    }

    lines
}

/// Average vertical distance between consecutive baselines.
fn average_line_spacing(lines: &[PositionedLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Whether `curr` starts a new block after `prev`.
fn should_break_block(prev: &PositionedLine, curr: &PositionedLine, avg_spacing: f32) -> bool {
    let spacing = (prev.y - curr.y).abs();
    spacing > avg_spacing * 1.5
        || (prev.font_size - curr.font_size).abs() > 1.0
        || (prev.x - curr.x).abs() > 20.0
}

/// Group lines into blocks.
fn group_lines_into_blocks(
    lines: Vec<PositionedLine>,
    page: u32,
    page_height: f32,
) -> Vec<TextBlock> {
    if lines.is_empty() {
        return Vec::new();
    }

    let avg_spacing = average_line_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<PositionedLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(finish_block(std::mem::take(&mut current), page, page_height));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(finish_block(current, page, page_height));
    }

    blocks
}

fn finish_block(lines: Vec<PositionedLine>, page: u32, page_height: f32) -> TextBlock {
    let bbox = lines
        .iter()
        .map(|l| l.bbox(page_height))
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or_default();

    let lines = lines.into_iter().map(|l| Line::new(l.spans)).collect();
    TextBlock::new(page, bbox, lines)
}

/// Check if character is from a script that doesn't use word spaces.
///
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Backend that serves pre-decoded operations for every page.
    struct MockBackend {
        pages: Vec<Vec<ContentOp>>,
    }

    impl PdfBackend for MockBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            (0..self.pages.len())
                .map(|i| (i as u32 + 1, (i as u32 + 10, 0)))
                .collect()
        }

        fn page_size(&self, _page: PageId) -> (f32, f32) {
            (612.0, 792.0)
        }

        fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
            // Encode the page index; decode_content looks it up again.
            Ok(vec![(page.0 - 10) as u8 + 1])
        }

        fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
            let idx = data[0] as usize - 1;
            Ok(self.pages[idx].clone())
        }

        fn decode_text(&self, _page: PageId, _font_name: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }
    }

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp::new(operator, operands)
    }

    fn tf(size: f32) -> ContentOp {
        op("Tf", vec![PdfValue::Name(b"F1".to_vec()), PdfValue::Real(size)])
    }

    fn td(x: f32, y: f32) -> ContentOp {
        op("Td", vec![PdfValue::Real(x), PdfValue::Real(y)])
    }

    fn tj(text: &str) -> ContentOp {
        op("Tj", vec![PdfValue::Str(text.as_bytes().to_vec())])
    }

    /// One BT..ET object placing `text` at an absolute position.
    fn text_at(x: f32, y: f32, size: f32, text: &str) -> Vec<ContentOp> {
        vec![op("BT", vec![]), tf(size), td(x, y), tj(text), op("ET", vec![])]
    }

    fn backend(pages: Vec<Vec<Vec<ContentOp>>>) -> MockBackend {
        MockBackend {
            pages: pages
                .into_iter()
                .map(|objs| objs.into_iter().flatten().collect())
                .collect(),
        }
    }

    #[test]
    fn test_extract_simple_run() {
        let b = backend(vec![vec![text_at(72.0, 700.0, 12.0, "Hello World")]]);
        let analyzer = LayoutAnalyzer::new(&b);
        let runs = analyzer.extract_page_runs(1).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Hello World");
        assert_eq!(runs[0].x, 72.0);
        assert_eq!(runs[0].y, 700.0);
        assert_eq!(runs[0].font_size, 12.0);
    }

    fn cm(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> ContentOp {
        op(
            "cm",
            [a, b, c, d, e, f].into_iter().map(PdfValue::Real).collect(),
        )
    }

    #[test]
    fn test_ctm_scale_applies_to_size_and_position() {
        let mut ops = vec![op("q", vec![]), cm(0.5, 0.0, 0.0, 0.5, 0.0, 0.0)];
        ops.extend(text_at(144.0, 1440.0, 48.0, "Heading"));
        ops.push(op("Q", vec![]));
        ops.extend(text_at(72.0, 100.0, 12.0, "After"));

        let b = backend(vec![vec![ops]]);
        let runs = LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].font_size, 24.0);
        assert_eq!((runs[0].x, runs[0].y), (72.0, 720.0));
        assert_eq!(runs[0].width, 84.0);

        // Q restores the identity CTM.
        assert_eq!(runs[1].font_size, 12.0);
        assert_eq!((runs[1].x, runs[1].y), (72.0, 100.0));

        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        assert!((blocks[0].bbox.y0 - (792.0 - 720.0 - 24.0 * 0.8)).abs() < 0.01);
        assert_eq!(blocks[0].first_span().unwrap().size, 24.0);
    }

    #[test]
    fn test_flipped_ctm_keeps_reading_order() {
        // Top-down user space: y = 72 is near the top of the page.
        let mut ops = vec![op("q", vec![]), cm(1.0, 0.0, 0.0, -1.0, 0.0, 792.0)];
        ops.extend(text_at(72.0, 72.0, 12.0, "Top"));
        ops.extend(text_at(72.0, 700.0, 12.0, "Bottom"));
        ops.push(op("Q", vec![]));

        let b = backend(vec![vec![ops]]);
        let runs = LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap();
        assert_eq!(runs[0].y, 720.0);
        assert_eq!(runs[1].y, 92.0);
        assert!(runs.iter().all(|r| r.font_size == 12.0));

        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        let texts: Vec<String> = blocks.iter().map(|b| b.text()).collect();
        assert_eq!(texts.concat().replace(' ', ""), "TopBottom");
        assert!(texts[0].starts_with("Top"));
    }

    #[test]
    fn test_unbalanced_restore_keeps_ctm() {
        let mut ops = vec![cm(2.0, 0.0, 0.0, 2.0, 0.0, 0.0), op("Q", vec![])];
        ops.extend(text_at(36.0, 350.0, 6.0, "Doubled"));

        let b = backend(vec![vec![ops]]);
        let runs = LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap();
        assert_eq!(runs[0].font_size, 12.0);
        assert_eq!((runs[0].x, runs[0].y), (72.0, 700.0));
    }

    #[test]
    fn test_text_matrix_scales_font_size() {
        let ops = vec![
            op("BT", vec![]),
            tf(1.0),
            op(
                "Tm",
                vec![
                    PdfValue::Integer(18),
                    PdfValue::Integer(0),
                    PdfValue::Integer(0),
                    PdfValue::Integer(18),
                    PdfValue::Integer(72),
                    PdfValue::Integer(720),
                ],
            ),
            tj("Scaled"),
            op("ET", vec![]),
        ];
        let b = backend(vec![vec![ops]]);
        let runs = LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap();
        assert_eq!(runs[0].font_size, 18.0);
        assert_eq!(runs[0].x, 72.0);
        assert_eq!(runs[0].y, 720.0);
    }

    #[test]
    fn test_leading_and_next_line() {
        let ops = vec![
            op("BT", vec![]),
            tf(10.0),
            op("TL", vec![PdfValue::Integer(14)]),
            td(72.0, 700.0),
            tj("first"),
            op("T*", vec![]),
            tj("second"),
            op("'", vec![PdfValue::Str(b"third".to_vec())]),
            op("ET", vec![]),
        ];
        let b = backend(vec![vec![ops]]);
        let runs = LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap();
        let ys: Vec<f32> = runs.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![700.0, 686.0, 672.0]);
        assert!(runs.iter().all(|r| r.x == 72.0));
    }

    #[test]
    fn test_tj_array_word_break() {
        let ops = vec![
            op("BT", vec![]),
            tf(12.0),
            td(72.0, 700.0),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    PdfValue::Str(b"Hello".to_vec()),
                    PdfValue::Integer(-300),
                    PdfValue::Str(b"World".to_vec()),
                    PdfValue::Integer(-20),
                    PdfValue::Str(b"!".to_vec()),
                ])],
            ),
            op("ET", vec![]),
        ];
        let b = backend(vec![vec![ops]]);
        let runs = LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap();
        assert_eq!(runs[0].text, "Hello World!");
    }

    #[test]
    fn test_runs_outside_text_object_ignored() {
        let ops = vec![tf(12.0), tj("stray")];
        let b = backend(vec![vec![ops]]);
        assert!(LayoutAnalyzer::new(&b).extract_page_runs(1).unwrap().is_empty());
    }

    #[test]
    fn test_same_line_runs_merge_into_spans() {
        let ops = vec![
            op("BT", vec![]),
            tf(12.0),
            td(72.0, 700.0),
            tj("Chapter"),
            tf(12.2),
            tj("One"),
            tf(8.0),
            tj("note"),
            op("ET", vec![]),
        ];
        let b = backend(vec![vec![ops]]);
        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        assert_eq!(blocks.len(), 1);
        let spans = &blocks[0].lines[0].spans;
        // 12 and 12.2 round to the same key; 8 starts a new span.
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "ChapterOne");
        assert_eq!(spans[1].text, "note");
        assert_eq!(spans[1].size, 8.0);
    }

    #[test]
    fn test_gap_inserts_space() {
        let b = backend(vec![vec![
            text_at(72.0, 700.0, 12.0, "Left"),
            text_at(200.0, 700.0, 12.0, "Right"),
        ]]);
        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "Left Right");
    }

    #[test]
    fn test_blocks_split_on_size_and_spacing() {
        let b = backend(vec![vec![
            text_at(72.0, 720.0, 24.0, "Document Title Here"),
            text_at(72.0, 660.0, 16.0, "Introduction"),
            text_at(72.0, 630.0, 10.0, "Body line one"),
            text_at(72.0, 618.0, 10.0, "Body line two"),
            text_at(72.0, 606.0, 10.0, "Body line three"),
        ]]);
        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        let texts: Vec<String> = blocks.iter().map(TextBlock::text).collect();
        assert_eq!(
            texts,
            vec![
                "Document Title Here",
                "Introduction",
                "Body line one Body line two Body line three",
            ]
        );
        assert_eq!(blocks[2].lines.len(), 3);
        assert!(blocks.iter().all(|b| b.page == 1));
    }

    #[test]
    fn test_bbox_uses_top_left_origin() {
        let b = backend(vec![vec![text_at(72.0, 700.0, 10.0, "Line")]]);
        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        let bbox = blocks[0].bbox;
        // top = 792 - (700 + 8), bottom = 792 - (700 - 2)
        assert_eq!(bbox.y0, 84.0);
        assert_eq!(bbox.y1, 94.0);
        assert_eq!(bbox.x0, 72.0);
        assert!(bbox.x1 > bbox.x0);
    }

    #[test]
    fn test_reading_order_top_to_bottom() {
        // Content stream order is bottom first; output is top first.
        let b = backend(vec![vec![
            text_at(72.0, 100.0, 10.0, "Footer text"),
            text_at(72.0, 700.0, 18.0, "Heading"),
        ]]);
        let blocks = LayoutAnalyzer::new(&b).extract_page_blocks(1).unwrap();
        assert_eq!(blocks[0].text(), "Heading");
        assert_eq!(blocks[1].text(), "Footer text");
    }

    #[test]
    fn test_page_out_of_range() {
        let b = backend(vec![vec![]]);
        let result = LayoutAnalyzer::new(&b).extract_page_blocks(3);
        assert!(matches!(result, Err(Error::PageOutOfRange(3, 1))));
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
