//! Paginated PDF export: one captured slice per A4 page.
//!
//! Each slice is JPEG-encoded and embedded as a DCT image XObject, drawn at
//! the full page width with its natural height, top-aligned.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::export::paginate::{paginate, PageSize, A4};
use crate::export::raster::{CaptureWindow, Rasterizer, CAPTURE_SCALE};
use crate::export::ExportError;
use crate::layout::DocumentLayout;

const PT_PER_MM: f32 = 72.0 / 25.4;
const JPEG_QUALITY: u8 = 92;

/// Captures `layout` page by page and assembles the PDF bytes.
/// Slices are captured strictly one after another.
pub async fn export_pdf(
    rasterizer: &dyn Rasterizer,
    layout: &DocumentLayout,
) -> Result<Vec<u8>, ExportError> {
    let plan = paginate(layout.height, layout.width, A4);
    tracing::info!(
        pages = plan.page_count,
        height_px = layout.height,
        "Capturing resume for PDF"
    );

    let mut writer = PdfWriter::new(A4);
    for slice in &plan.slices {
        let window = CaptureWindow {
            y: slice.offset_px,
            height: slice.height_px,
        };
        let image = rasterizer.capture(layout, window, CAPTURE_SCALE).await?;
        writer.add_image_page(image)?;
    }
    tracing::debug!(pages = writer.page_count(), "Assembling PDF");
    writer.finish()
}

/// Builds a PDF whose pages are each a single full-width image.
pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    width_pt: f32,
    height_pt: f32,
}

impl PdfWriter {
    pub fn new(page: PageSize) -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            width_pt: page.width_mm * PT_PER_MM,
            height_pt: page.height_mm * PT_PER_MM,
        }
    }

    pub fn add_image_page(&mut self, image: RgbaImage) -> Result<(), ExportError> {
        let (width_px, height_px) = image.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(ExportError::EmptyCapture);
        }

        let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
        let mut jpeg = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))?;

        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width_px as i64,
                "Height" => height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        );
        let image_id = self.document.add_object(image_stream);

        // Width-fit, natural height, anchored to the top edge.
        let draw_w = self.width_pt;
        let draw_h = height_px as f32 * draw_w / width_px as f32;
        let y = self.height_pt - draw_h;
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        draw_w.into(),
                        0.into(),
                        0.into(),
                        draw_h.into(),
                        0.into(),
                        y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width_pt.into(), self.height_pt.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes).map_err(lopdf::Error::from)?;
        Ok(bytes)
    }
}
