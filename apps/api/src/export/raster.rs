//! Rasterization of a laid-out resume into pixels.
//!
//! The capture is a black box behind `Rasterizer`. The built-in
//! `BlockRasterizer` paints every text run as solid glyph-run bars, which
//! keeps exports deterministic and free of font files.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{imageops, Rgba, RgbaImage};

use crate::export::ExportError;
use crate::layout::{DocumentLayout, LayoutItem, PhotoBox, RuleBox, TextRun};
use crate::templates::Rgb;

/// Device pixels per CSS pixel for every capture.
pub const CAPTURE_SCALE: f32 = 2.0;

/// Vertical band of the layout to capture, in CSS px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureWindow {
    pub y: f32,
    pub height: f32,
}

impl CaptureWindow {
    pub fn full(layout: &DocumentLayout) -> Self {
        Self {
            y: 0.0,
            height: layout.height,
        }
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Captures `window` of `layout` at `scale` device pixels per CSS pixel.
    /// The image is `layout.width * scale` wide and `window.height * scale` tall.
    async fn capture(
        &self,
        layout: &DocumentLayout,
        window: CaptureWindow,
        scale: f32,
    ) -> Result<RgbaImage, ExportError>;
}

pub struct BlockRasterizer;

#[async_trait]
impl Rasterizer for BlockRasterizer {
    async fn capture(
        &self,
        layout: &DocumentLayout,
        window: CaptureWindow,
        scale: f32,
    ) -> Result<RgbaImage, ExportError> {
        let layout = layout.clone();
        tokio::task::spawn_blocking(move || paint(&layout, window, scale))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}

fn paint(
    layout: &DocumentLayout,
    window: CaptureWindow,
    scale: f32,
) -> Result<RgbaImage, ExportError> {
    let width = (layout.width * scale).round() as u32;
    let height = (window.height * scale).ceil() as u32;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCapture);
    }

    let mut canvas = RgbaImage::from_pixel(width, height, rgba(layout.background));
    let mut painter = Painter {
        canvas: &mut canvas,
        origin_y: window.y,
        scale,
    };

    for item in &layout.items {
        let (top, bottom) = item.span();
        if bottom <= window.y || top >= window.y + window.height {
            continue;
        }
        match item {
            LayoutItem::Text(run) => painter.text(run),
            LayoutItem::Rule(rule) => painter.rule(rule),
            LayoutItem::Photo(photo) => painter.photo(photo)?,
        }
    }
    Ok(canvas)
}

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.0, color.1, color.2, 0xff])
}

struct Painter<'a> {
    canvas: &'a mut RgbaImage,
    origin_y: f32,
    scale: f32,
}

impl Painter<'_> {
    /// Fills the CSS-px rectangle, clipped to the canvas.
    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        let x0 = (x * self.scale).round().max(0.0) as i64;
        let y0 = ((y - self.origin_y) * self.scale).round() as i64;
        let x1 = ((x + w) * self.scale).round() as i64;
        let y1 = ((y + h - self.origin_y) * self.scale).round() as i64;
        let x1 = x1.min(i64::from(self.canvas.width()));
        let y0 = y0.max(0);
        let y1 = y1.min(i64::from(self.canvas.height()));
        for py in y0..y1 {
            for px in x0..x1 {
                self.canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// One bar per word, proportional to the word's share of the run.
    fn text(&mut self, run: &TextRun) {
        let chars: Vec<char> = run.text.chars().collect();
        if chars.is_empty() {
            return;
        }
        let char_width = run.width / chars.len() as f32;
        let bar_height = run.font_size * if run.strong { 0.62 } else { 0.5 };
        let bar_y = run.y + (run.line_height - bar_height) / 2.0;
        let color = rgba(run.color);

        let mut start: Option<usize> = None;
        for (i, c) in chars.iter().chain(std::iter::once(&' ')).enumerate() {
            match (c.is_whitespace(), start) {
                (false, None) => start = Some(i),
                (true, Some(s)) => {
                    let x = run.x + s as f32 * char_width;
                    self.fill(x, bar_y, (i - s) as f32 * char_width, bar_height, color);
                    start = None;
                }
                _ => {}
            }
        }
    }

    fn rule(&mut self, rule: &RuleBox) {
        self.fill(rule.x, rule.y, rule.width, rule.thickness, rgba(rule.color));
    }

    fn photo(&mut self, photo: &PhotoBox) -> Result<(), ExportError> {
        let source = photo.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            // Cross-origin pixels cannot be read back into an export.
            return Err(ExportError::TaintedCanvas(source.to_string()));
        }

        let side = (photo.size * self.scale).round() as u32;
        let x = (photo.x * self.scale).round() as i64;
        let y = ((photo.y - self.origin_y) * self.scale).round() as i64;
        match decode_data_uri(source) {
            Some(decoded) => {
                let scaled = imageops::resize(&decoded, side, side, imageops::FilterType::Triangle);
                imageops::overlay(&mut *self.canvas, &scaled, x, y);
            }
            None => {
                tracing::debug!("photo is not a decodable data URI, painting a frame");
                self.fill(photo.x, photo.y, photo.size, photo.size, Rgba([0xdd, 0xdd, 0xdd, 0xff]));
            }
        }
        Ok(())
    }
}

/// Decodes `data:image/...;base64,...` into pixels.
fn decode_data_uri(source: &str) -> Option<RgbaImage> {
    let rest = source.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    image::load_from_memory(&bytes).ok().map(|img| img.to_rgba8())
}
