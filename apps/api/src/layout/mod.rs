//! Layout estimation: positions the content tree in CSS pixels.
//!
//! Exports need the full scrollable height of the rendered resume and the
//! position of every run inside it. Wrapping is greedy word-wrap over the
//! static metric tables in `font_metrics`, at a fixed content width.

pub mod font_metrics;

use serde::Serialize;

use crate::render::{ContentTree, EntryBlock, SectionBody, Span};
use crate::templates::{DividerLine, DividerStyle, Rgb};
use font_metrics::FontMetricTable;

// ────────────────────────────────────────────────────────────────────────────
// Geometry constants (CSS px, 1rem = 16px)
// ────────────────────────────────────────────────────────────────────────────

pub const CONTENT_WIDTH_PX: f32 = 800.0;
const PADDING_PX: f32 = 40.0;
const BODY_FONT_PX: f32 = 16.0;
const LINE_HEIGHT: f32 = 1.5;
const NAME_FONT_PX: f32 = 32.0;
const TITLE_FONT_PX: f32 = 19.2;
const SECTION_TITLE_FONT_PX: f32 = 19.2;
const SECTION_TITLE_GAP_PX: f32 = 8.0;
const HEADER_GAP_PX: f32 = 24.0;
const PHOTO_SIZE_PX: f32 = 96.0;
const PHOTO_GAP_PX: f32 = 24.0;
const BULLET_INDENT_PX: f32 = 24.0;
const ENTRY_GAP_PX: f32 = 16.0;
const LINK_COLOR: Rgb = Rgb(0x1a, 0x73, 0xe8);

/// Page width and padding the layout is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width_px: f32,
    pub padding_px: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: CONTENT_WIDTH_PX,
            padding_px: PADDING_PX,
        }
    }
}

impl Viewport {
    fn text_width(&self) -> f32 {
        self.width_px - 2.0 * self.padding_px
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// A single line fragment of one weight and colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub line_height: f32,
    pub font_size: f32,
    pub color: Rgb,
    pub strong: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub thickness: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoBox {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutItem {
    Text(TextRun),
    Rule(RuleBox),
    Photo(PhotoBox),
}

impl LayoutItem {
    /// Vertical extent `[top, bottom)`.
    pub fn span(&self) -> (f32, f32) {
        match self {
            LayoutItem::Text(run) => (run.y, run.y + run.line_height),
            LayoutItem::Rule(rule) => (rule.y, rule.y + rule.thickness),
            LayoutItem::Photo(photo) => (photo.y, photo.y + photo.size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub width: f32,
    /// Full scrollable height, not just what fits in a viewport.
    pub height: f32,
    pub background: Rgb,
    pub items: Vec<LayoutItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

struct Cursor<'a> {
    metrics: &'a FontMetricTable,
    items: Vec<LayoutItem>,
    y: f32,
}

impl Cursor<'_> {
    /// Flows `spans` into lines starting at `x` with `max_width` available.
    /// Consecutive words of one weight on one line merge into a single run.
    fn flow(&mut self, spans: &[Span], x: f32, max_width: f32, font_size: f32, color: Rgb) {
        let line_height = font_size * LINE_HEIGHT;
        let space = self.metrics.space_px(font_size);
        let mut line: Vec<TextRun> = Vec::new();
        let mut line_width = 0.0_f32;

        let words = spans.iter().flat_map(|span| {
            span.text
                .split_whitespace()
                .map(move |word| (word, span.strong))
        });

        for (word, strong) in words {
            let word_width = self.metrics.measure_px(word, font_size, strong);
            let gap = if line.is_empty() { 0.0 } else { space };
            if !line.is_empty() && line_width + gap + word_width > max_width {
                self.items.extend(line.drain(..).map(LayoutItem::Text));
                self.y += line_height;
                line_width = 0.0;
            }
            let gap = if line.is_empty() { 0.0 } else { space };
            match line.last_mut() {
                Some(run) if run.strong == strong => {
                    run.text.push(' ');
                    run.text.push_str(word);
                    run.width += gap + word_width;
                }
                _ => line.push(TextRun {
                    x: x + line_width + gap,
                    y: self.y,
                    width: word_width,
                    line_height,
                    font_size,
                    color,
                    strong,
                    text: word.to_string(),
                }),
            }
            line_width += gap + word_width;
        }

        // An empty flow still occupies one line, like an empty block with text-height.
        self.items.extend(line.into_iter().map(LayoutItem::Text));
        self.y += line_height;
    }

    fn rule(&mut self, x: f32, width: f32, thickness: f32, color: Rgb) {
        self.items.push(LayoutItem::Rule(RuleBox {
            x,
            y: self.y,
            width,
            thickness,
            color,
        }));
        self.y += thickness;
    }

    /// A CSS border of `style`. `double` splits the width into line, gap, line.
    fn divider(&mut self, x: f32, width: f32, style: DividerStyle) {
        let total = f32::from(style.width_px);
        match style.line {
            DividerLine::Solid => self.rule(x, width, total, style.color),
            DividerLine::Double => {
                let line = (total / 3.0).max(1.0);
                self.rule(x, width, line, style.color);
                self.y += (total - 2.0 * line).max(0.0);
                self.rule(x, width, line, style.color);
            }
        }
    }
}

/// Lays out `content` for `viewport` and returns every positioned item plus
/// the total height.
pub fn layout_content(content: &ContentTree, viewport: &Viewport) -> DocumentLayout {
    let style = content.style;
    let metrics = FontMetricTable::for_typeface(style.metrics);
    let left = viewport.padding_px;
    let text_width = viewport.text_width();
    let mut cursor = Cursor {
        metrics,
        items: Vec::new(),
        y: viewport.padding_px,
    };

    // Header: optional photo on the left, name/title/contact beside it.
    let header = &content.header;
    let header_top = cursor.y;
    let mut text_left = left;
    if let Some(photo) = &header.photo {
        cursor.items.push(LayoutItem::Photo(PhotoBox {
            x: left,
            y: header_top,
            size: PHOTO_SIZE_PX,
            source: photo.clone(),
        }));
        text_left += PHOTO_SIZE_PX + PHOTO_GAP_PX;
    }
    let header_text_width = text_width - (text_left - left);
    cursor.flow(
        &[Span::strong(&header.name)],
        text_left,
        header_text_width,
        NAME_FONT_PX,
        style.body_color,
    );
    cursor.flow(
        &[Span::plain(&header.title)],
        text_left,
        header_text_width,
        TITLE_FONT_PX,
        style.accent_color,
    );
    cursor.flow(
        &[Span::plain(&header.contact_line)],
        text_left,
        header_text_width,
        BODY_FONT_PX,
        style.body_color,
    );
    if header.photo.is_some() {
        cursor.y = cursor.y.max(header_top + PHOTO_SIZE_PX);
    }
    cursor.y += SECTION_TITLE_GAP_PX;
    cursor.divider(left, text_width, style.section_divider_style);
    cursor.y += HEADER_GAP_PX;

    for block in &content.sections {
        cursor.flow(
            &[Span::strong(&block.title)],
            left,
            text_width,
            SECTION_TITLE_FONT_PX,
            block.title_color,
        );
        cursor.y += SECTION_TITLE_GAP_PX;

        match &block.body {
            SectionBody::Paragraph(text) => {
                cursor.flow(&[Span::plain(text)], left, text_width, BODY_FONT_PX, style.body_color);
            }
            SectionBody::Bullets(items) => {
                for item in items {
                    layout_bullet(&mut cursor, item, left, text_width, style.body_color);
                }
            }
            SectionBody::Entries(entries) => {
                for entry in entries {
                    layout_entry(&mut cursor, entry, left, text_width, style.body_color);
                }
            }
        }
        cursor.y += style.section_spacing_px;
    }

    DocumentLayout {
        width: viewport.width_px,
        height: cursor.y + viewport.padding_px,
        background: Rgb::WHITE,
        items: cursor.items,
    }
}

fn layout_bullet(cursor: &mut Cursor<'_>, item: &str, left: f32, width: f32, color: Rgb) {
    let marker_y = cursor.y;
    cursor.flow(
        &[Span::plain(item)],
        left + BULLET_INDENT_PX,
        width - BULLET_INDENT_PX,
        BODY_FONT_PX,
        color,
    );
    let marker = BODY_FONT_PX * 0.3;
    cursor.items.push(LayoutItem::Rule(RuleBox {
        x: left + BULLET_INDENT_PX / 2.0 - marker / 2.0,
        y: marker_y + (BODY_FONT_PX * LINE_HEIGHT - marker) / 2.0,
        width: marker,
        thickness: marker,
        color,
    }));
}

fn layout_entry(cursor: &mut Cursor<'_>, entry: &EntryBlock, left: f32, width: f32, color: Rgb) {
    cursor.flow(&entry.headline, left, width, BODY_FONT_PX, color);
    for detail in &entry.details {
        cursor.flow(&[Span::plain(detail)], left, width, BODY_FONT_PX, color);
    }
    if let Some(link) = &entry.link {
        cursor.flow(&[Span::plain(link)], left, width, BODY_FONT_PX, LINK_COLOR);
    }
    cursor.y += ENTRY_GAP_PX;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeDocument;
    use crate::order::SectionOrder;
    use crate::render::render_content;
    use crate::templates::resolve;

    fn layout(doc: &ResumeDocument, template: &str) -> DocumentLayout {
        let content = render_content(doc, &SectionOrder::default(), resolve(template));
        layout_content(&content, &Viewport::default())
    }

    #[test]
    fn test_empty_document_has_header_height() {
        let l = layout(&ResumeDocument::default(), "modern");
        assert!(l.height > 2.0 * PADDING_PX);
        assert_eq!(l.width, CONTENT_WIDTH_PX);
    }

    #[test]
    fn test_more_content_is_taller() {
        let mut doc = ResumeDocument::default();
        let short = layout(&doc, "modern").height;
        for i in 0..40 {
            doc.achievements.add(&format!("Achievement number {i}"));
        }
        assert!(layout(&doc, "modern").height > short + 40.0 * BODY_FONT_PX);
    }

    #[test]
    fn test_long_paragraph_wraps_within_text_width() {
        let mut doc = ResumeDocument::default();
        doc.summary = "word ".repeat(400);
        let l = layout(&doc, "creative");
        let viewport = Viewport::default();
        for item in &l.items {
            if let LayoutItem::Text(run) = item {
                assert!(
                    run.x + run.width <= viewport.width_px - viewport.padding_px + 0.01,
                    "run overflows: {run:?}"
                );
            }
        }
    }

    #[test]
    fn test_photo_pushes_header_text_right() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Ada".to_string();
        doc.personal_info.photo = Some("data:image/png;base64,AAAA".to_string());
        let l = layout(&doc, "modern");
        let photo = l
            .items
            .iter()
            .find_map(|i| match i {
                LayoutItem::Photo(p) => Some(p.clone()),
                _ => None,
            })
            .unwrap();
        let name = l
            .items
            .iter()
            .find_map(|i| match i {
                LayoutItem::Text(t) if t.text == "Ada" => Some(t.clone()),
                _ => None,
            })
            .unwrap();
        assert!(name.x >= photo.x + photo.size);
    }

    fn header_rules(l: &DocumentLayout) -> Vec<RuleBox> {
        let full = Viewport::default().text_width();
        l.items
            .iter()
            .filter_map(|i| match i {
                LayoutItem::Rule(r) if r.width == full => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_double_divider_is_two_thin_rules() {
        let rules = header_rules(&layout(&ResumeDocument::default(), "creative"));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].thickness, 1.0);
        assert_eq!(rules[1].thickness, 1.0);
        assert_eq!(rules[1].y - rules[0].y, 2.0);
        assert_eq!(rules[0].color, Rgb(0xe1, 0x70, 0x55));

        let rules = header_rules(&layout(&ResumeDocument::default(), "modern"));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].thickness, 2.0);
        assert_eq!(rules[0].color, Rgb(0xe0, 0xe0, 0xe0));
    }

    #[test]
    fn test_items_lie_within_height() {
        let mut doc = ResumeDocument::default();
        doc.summary = "A short summary.".to_string();
        doc.skills.add("Rust");
        let l = layout(&doc, "classic");
        for item in &l.items {
            let (_, bottom) = item.span();
            assert!(bottom <= l.height);
        }
    }
}
