//! Single-image PNG export of the full scrollable height.

use image::codecs::png::PngEncoder;

use crate::export::raster::{CaptureWindow, Rasterizer, CAPTURE_SCALE};
use crate::export::ExportError;
use crate::layout::DocumentLayout;

pub async fn export_png(
    rasterizer: &dyn Rasterizer,
    layout: &DocumentLayout,
) -> Result<Vec<u8>, ExportError> {
    tracing::info!(height_px = layout.height, "Capturing resume for PNG");
    let image = rasterizer
        .capture(layout, CaptureWindow::full(layout), CAPTURE_SCALE)
        .await?;
    let mut bytes = Vec::new();
    image.write_with_encoder(PngEncoder::new(&mut bytes))?;
    Ok(bytes)
}
