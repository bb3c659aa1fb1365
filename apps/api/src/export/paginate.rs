//! Splits the full-height capture into page-sized slices.
//!
//! Slice offsets are computed from the page index, never accumulated, so
//! consecutive slices tile the content with no gap and no overlap regardless
//! of floating-point drift.

use serde::Serialize;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

pub const A4: PageSize = PageSize {
    width_mm: 210.0,
    height_mm: 297.0,
};

/// One page's band of the content, in CSS px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slice {
    pub index: usize,
    pub offset_px: f32,
    pub height_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlan {
    /// Millimetres per CSS px when the content is fit to the page width.
    pub scale: f32,
    pub page_count: usize,
    pub slices: Vec<Slice>,
}

pub fn paginate(content_height_px: f32, content_width_px: f32, page: PageSize) -> PagePlan {
    let scale = page.width_mm / content_width_px;
    let page_height_px = page.height_mm / scale;
    let page_count = ((content_height_px * scale / page.height_mm).ceil() as usize).max(1);

    let slices = (0..page_count)
        .map(|index| {
            let offset_px = index as f32 * page.height_mm / scale;
            Slice {
                index,
                offset_px,
                height_px: page_height_px.min(content_height_px - offset_px),
            }
        })
        .collect();

    PagePlan {
        scale,
        page_count,
        slices,
    }
}
