//! Static font-metric tables for the three template typefaces.
//!
//! Character widths are in em units (relative to font size). This is an
//! approximation of the real glyph advances, good enough to estimate where
//! lines wrap and therefore how tall a rendered resume is.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Metric families, one per template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Typeface {
    /// Modern template: humanist sans-serif.
    Inter,
    /// Classic template: transitional serif, slightly wider than Inter.
    Georgia,
    /// Creative template: geometric sans-serif with wide rounds.
    Poppins,
}

/// Bold runs are roughly this much wider than regular ones.
const BOLD_WIDTH_FACTOR: f32 = 1.06;

pub struct FontMetricTable {
    widths: &'static [f32; 95],
    /// Multiplier applied to `widths` for this face.
    width_scale: f32,
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    pub fn for_typeface(typeface: Typeface) -> &'static FontMetricTable {
        match typeface {
            Typeface::Inter => &INTER_TABLE,
            Typeface::Georgia => &GEORGIA_TABLE,
            Typeface::Poppins => &POPPINS_TABLE,
        }
    }

    /// Width of `s` in em units at regular weight.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32] * self.width_scale
                } else {
                    self.average_char_width * self.width_scale
                }
            })
            .sum()
    }

    /// Width of `s` in CSS pixels.
    pub fn measure_px(&self, s: &str, font_size_px: f32, strong: bool) -> f32 {
        let weight = if strong { BOLD_WIDTH_FACTOR } else { 1.0 };
        self.measure_em(s) * font_size_px * weight
    }

    pub fn space_px(&self, font_size_px: f32) -> f32 {
        self.space_width * self.width_scale * font_size_px
    }
}

/// Inter advance widths in em, shared by every face and scaled per face.
#[rustfmt::skip]
static BASE_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

static INTER_TABLE: FontMetricTable = FontMetricTable {
    widths: &BASE_WIDTHS,
    width_scale: 1.0,
    average_char_width: 0.52,
    space_width: 0.25,
};

static GEORGIA_TABLE: FontMetricTable = FontMetricTable {
    widths: &BASE_WIDTHS,
    width_scale: 1.04,
    average_char_width: 0.52,
    space_width: 0.24,
};

static POPPINS_TABLE: FontMetricTable = FontMetricTable {
    widths: &BASE_WIDTHS,
    width_scale: 1.10,
    average_char_width: 0.52,
    space_width: 0.26,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_has_zero_width() {
        let t = FontMetricTable::for_typeface(Typeface::Inter);
        assert_eq!(t.measure_em(""), 0.0);
    }

    #[test]
    fn test_faces_scale_widths() {
        let inter = FontMetricTable::for_typeface(Typeface::Inter).measure_em("Resume");
        let georgia = FontMetricTable::for_typeface(Typeface::Georgia).measure_em("Resume");
        let poppins = FontMetricTable::for_typeface(Typeface::Poppins).measure_em("Resume");
        assert!(inter < georgia && georgia < poppins);
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let t = FontMetricTable::for_typeface(Typeface::Inter);
        assert!((t.measure_em("é") - 0.52).abs() < 1e-6);
    }

    #[test]
    fn test_bold_is_wider() {
        let t = FontMetricTable::for_typeface(Typeface::Inter);
        assert!(t.measure_px("Engineer", 16.0, true) > t.measure_px("Engineer", 16.0, false));
    }
}
