//! Template style bundles.
//!
//! Exactly three bundles exist. `resolve` hands out `&'static` references so a
//! renderer calling it many times per pass always sees the same bundle, and an
//! unknown id quietly falls back to `modern`.

pub mod handlers;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::layout::font_metrics::Typeface;

// ────────────────────────────────────────────────────────────────────────────
// Template ids
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
        }
    }

    /// Label shown in the template selector.
    pub fn label(self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern",
            TemplateId::Classic => "Classic",
            TemplateId::Creative => "Creative",
        }
    }

    /// Lenient parse: anything unrecognized is `Modern`.
    pub fn parse(raw: &str) -> Self {
        Self::parse_strict(raw).unwrap_or_default()
    }

    pub fn parse_strict(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TemplateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TemplateId::parse(&raw))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style bundle
// ────────────────────────────────────────────────────────────────────────────

/// 24-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleCase {
    Uppercase,
    None,
    Capitalize,
}

impl TitleCase {
    /// Applies the transform the way CSS `text-transform` does.
    pub fn apply(self, title: &str) -> String {
        match self {
            TitleCase::Uppercase => title.to_uppercase(),
            TitleCase::None => title.to_string(),
            TitleCase::Capitalize => title
                .split(' ')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            TitleCase::Uppercase => "uppercase",
            TitleCase::None => "none",
            TitleCase::Capitalize => "capitalize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerLine {
    Solid,
    /// Two lines with a gap, each a third of the width.
    Double,
}

/// Rule drawn under the header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DividerStyle {
    pub line: DividerLine,
    pub width_px: u8,
    pub color: Rgb,
}

impl DividerStyle {
    pub fn css(&self) -> String {
        let line = match self.line {
            DividerLine::Solid => "solid",
            DividerLine::Double => "double",
        };
        format!("{}px {} {}", self.width_px, line, self.color.hex())
    }
}

/// Typographic and visual rules shared by every renderer.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBundle {
    pub id: TemplateId,
    /// CSS font stack.
    pub typeface: &'static str,
    /// Metric family used for layout estimation and rasterization.
    #[serde(skip)]
    pub metrics: Typeface,
    pub body_color: Rgb,
    pub accent_color: Rgb,
    /// Vertical gap after each section block, in CSS pixels (1rem = 16px).
    pub section_spacing_px: f32,
    pub section_title_case: TitleCase,
    pub section_title_color: Rgb,
    pub section_divider_style: DividerStyle,
}

static MODERN: StyleBundle = StyleBundle {
    id: TemplateId::Modern,
    typeface: "Inter, Segoe UI, Arial, sans-serif",
    metrics: Typeface::Inter,
    body_color: Rgb(0x22, 0x22, 0x22),
    accent_color: Rgb(0x61, 0xda, 0xfb),
    section_spacing_px: 24.0,
    section_title_case: TitleCase::Uppercase,
    section_title_color: Rgb(0x61, 0xda, 0xfb),
    section_divider_style: DividerStyle {
        line: DividerLine::Solid,
        width_px: 2,
        color: Rgb(0xe0, 0xe0, 0xe0),
    },
};

static CLASSIC: StyleBundle = StyleBundle {
    id: TemplateId::Classic,
    typeface: "Georgia, Times New Roman, serif",
    metrics: Typeface::Georgia,
    body_color: Rgb(0x22, 0x22, 0x22),
    accent_color: Rgb(0x2d, 0x34, 0x36),
    section_spacing_px: 19.2,
    section_title_case: TitleCase::None,
    section_title_color: Rgb(0x2d, 0x34, 0x36),
    section_divider_style: DividerStyle {
        line: DividerLine::Solid,
        width_px: 1,
        color: Rgb(0xb2, 0xbe, 0xc3),
    },
};

static CREATIVE: StyleBundle = StyleBundle {
    id: TemplateId::Creative,
    typeface: "Poppins, Arial, sans-serif",
    metrics: Typeface::Poppins,
    body_color: Rgb(0x22, 0x22, 0x22),
    accent_color: Rgb(0xe1, 0x70, 0x55),
    section_spacing_px: 32.0,
    section_title_case: TitleCase::Capitalize,
    section_title_color: Rgb(0xe1, 0x70, 0x55),
    section_divider_style: DividerStyle {
        line: DividerLine::Double,
        width_px: 3,
        color: Rgb(0xe1, 0x70, 0x55),
    },
};

/// Returns the bundle for `template_id`, or the modern bundle when unknown.
pub fn resolve(template_id: &str) -> &'static StyleBundle {
    bundle(TemplateId::parse(template_id))
}

pub fn bundle(id: TemplateId) -> &'static StyleBundle {
    match id {
        TemplateId::Modern => &MODERN,
        TemplateId::Classic => &CLASSIC,
        TemplateId::Creative => &CREATIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_falls_back_to_modern() {
        assert!(std::ptr::eq(resolve("brutalist"), resolve("modern")));
        assert!(std::ptr::eq(resolve(""), resolve("modern")));
    }

    #[test]
    fn test_resolve_is_referentially_stable() {
        for id in TemplateId::ALL {
            assert!(std::ptr::eq(resolve(id.as_str()), resolve(id.as_str())));
            assert_eq!(resolve(id.as_str()).id, id);
        }
    }

    #[test]
    fn test_three_distinct_bundles() {
        assert_ne!(resolve("modern"), resolve("classic"));
        assert_ne!(resolve("classic"), resolve("creative"));
        assert_ne!(resolve("modern"), resolve("creative"));
    }

    #[test]
    fn test_title_case_transforms() {
        assert_eq!(TitleCase::Uppercase.apply("Work Experience"), "WORK EXPERIENCE");
        assert_eq!(TitleCase::None.apply("Work Experience"), "Work Experience");
        assert_eq!(TitleCase::Capitalize.apply("work experience"), "Work Experience");
    }

    #[test]
    fn test_template_id_serde_is_lenient() {
        let id: TemplateId = serde_json::from_str("\"CLASSIC\"").unwrap();
        assert_eq!(id, TemplateId::Classic);
        let id: TemplateId = serde_json::from_str("\"neon\"").unwrap();
        assert_eq!(id, TemplateId::Modern);
        assert_eq!(serde_json::to_string(&TemplateId::Creative).unwrap(), "\"creative\"");
    }

    #[test]
    fn test_bundle_colours_and_dividers() {
        let cases = [
            ("modern", "#61dafb", "2px solid #e0e0e0"),
            ("classic", "#2d3436", "1px solid #b2bec3"),
            ("creative", "#e17055", "3px double #e17055"),
        ];
        for (id, accent, divider) in cases {
            let style = resolve(id);
            assert_eq!(style.body_color.hex(), "#222222", "{id}");
            assert_eq!(style.accent_color.hex(), accent, "{id}");
            assert_eq!(style.section_title_color.hex(), accent, "{id}");
            assert_eq!(style.section_divider_style.css(), divider, "{id}");
        }
        assert_eq!(resolve("modern").section_spacing_px, 24.0);
        assert_eq!(resolve("classic").section_spacing_px, 19.2);
        assert_eq!(resolve("creative").section_spacing_px, 32.0);
    }
}
