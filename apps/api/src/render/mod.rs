//! Rendering pipeline: document + order + style → display tree.
//!
//! One renderer serves the interactive preview, the static download view, and
//! the public view. The captured part of the output (`ContentTree`) depends
//! only on (document, order, style); the interactive chrome sits beside it and
//! is never rasterized, so all three consumers export identical pixels.

pub mod blocks;
pub mod handlers;
pub mod html;

use serde::Serialize;

use crate::models::resume::{ResumeDocument, Section};
use crate::order::SectionOrder;
use crate::sections;
use crate::templates::{Rgb, StyleBundle, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Drag-reorderable sections plus the export action bar.
    Interactive,
    /// Display-only.
    Static,
}

// ────────────────────────────────────────────────────────────────────────────
// Tree
// ────────────────────────────────────────────────────────────────────────────

/// Inline text run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub strong: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: true,
        }
    }
}

/// One record of a record-list section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryBlock {
    pub headline: Vec<Span>,
    pub details: Vec<String>,
    pub link: Option<String>,
    /// Set only for `http`, `https` and `mailto` links; anything else shows as text.
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Bullets(Vec<String>),
    Entries(Vec<EntryBlock>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub section: Section,
    /// Title after the template's text transform.
    pub title: String,
    pub title_color: Rgb,
    pub body: SectionBody,
}

/// Name, title, and contact line. Always present, even when blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub name: String,
    pub title: String,
    pub contact_line: String,
    pub photo: Option<String>,
}

/// The captured subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentTree {
    pub style: &'static StyleBundle,
    pub header: HeaderBlock,
    pub sections: Vec<SectionBlock>,
}

/// An export command offered by the interactive action bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportAction {
    Pdf,
    Png,
    Print,
    AtsCheck,
}

impl ExportAction {
    pub const ALL: [ExportAction; 4] = [
        ExportAction::Pdf,
        ExportAction::Png,
        ExportAction::Print,
        ExportAction::AtsCheck,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExportAction::Pdf => "PDF",
            ExportAction::Png => "PNG",
            ExportAction::Print => "Print",
            ExportAction::AtsCheck => "ATS Check",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            ExportAction::Pdf => "/api/v1/export/pdf",
            ExportAction::Png => "/api/v1/export/png",
            ExportAction::Print => "/api/v1/export/print",
            ExportAction::AtsCheck => "/api/v1/ats",
        }
    }
}

/// Controls that only exist in interactive mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractiveChrome {
    pub actions: Vec<ExportAction>,
    pub selected_template: TemplateId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub mode: RenderMode,
    pub content: ContentTree,
    pub chrome: Option<InteractiveChrome>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub fn render(
    document: &ResumeDocument,
    order: &SectionOrder,
    style: &'static StyleBundle,
    mode: RenderMode,
) -> RenderTree {
    let content = render_content(document, order, style);
    let chrome = match mode {
        RenderMode::Interactive => Some(InteractiveChrome {
            actions: ExportAction::ALL.to_vec(),
            selected_template: style.id,
        }),
        RenderMode::Static => None,
    };
    RenderTree {
        mode,
        content,
        chrome,
    }
}

/// Header plus the non-empty sections in `order`.
pub fn render_content(
    document: &ResumeDocument,
    order: &SectionOrder,
    style: &'static StyleBundle,
) -> ContentTree {
    let sections = order
        .as_slice()
        .iter()
        .filter_map(|section| (sections::spec(*section).render)(document, style))
        .collect();
    ContentTree {
        style,
        header: blocks::header(document),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::WorkExperience;
    use crate::templates::resolve;

    fn document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Ada Lovelace".to_string();
        doc.skills.add("Analysis");
        doc.summary = "First programmer.".to_string();
        doc.work_experience.push(WorkExperience {
            company: "Analytical Engine".to_string(),
            role: "Programmer".to_string(),
            start: "1842".to_string(),
            end: "1843".to_string(),
            description: "Wrote note G.".to_string(),
        });
        doc
    }

    #[test]
    fn test_sections_follow_order_and_skip_empty() {
        let tree = render(
            &document(),
            &SectionOrder::default(),
            resolve("modern"),
            RenderMode::Static,
        );
        let rendered: Vec<Section> = tree.content.sections.iter().map(|b| b.section).collect();
        assert_eq!(
            rendered,
            [Section::Summary, Section::Skills, Section::WorkExperience]
        );
    }

    #[test]
    fn test_reordered_sections_render_in_new_order() {
        let mut order = SectionOrder::default();
        order.reorder(Section::WorkExperience, Section::Summary);
        let tree = render(&document(), &order, resolve("modern"), RenderMode::Static);
        assert_eq!(tree.content.sections[0].section, Section::WorkExperience);
    }

    #[test]
    fn test_header_rendered_for_blank_personal_info() {
        let tree = render(
            &ResumeDocument::default(),
            &SectionOrder::default(),
            resolve("classic"),
            RenderMode::Static,
        );
        assert!(tree.content.sections.is_empty());
        assert_eq!(tree.content.header.contact_line, " |  |  | ");
    }

    #[test]
    fn test_modes_share_identical_content() {
        let doc = document();
        let order = SectionOrder::default();
        for id in TemplateId::ALL {
            let style = resolve(id.as_str());
            let interactive = render(&doc, &order, style, RenderMode::Interactive);
            let fixed = render(&doc, &order, style, RenderMode::Static);
            assert_eq!(interactive.content, fixed.content);
            assert!(interactive.chrome.is_some());
            assert!(fixed.chrome.is_none());
        }
    }

    #[test]
    fn test_interactive_chrome_carries_actions_and_template() {
        let tree = render(
            &document(),
            &SectionOrder::default(),
            resolve("creative"),
            RenderMode::Interactive,
        );
        let chrome = tree.chrome.unwrap();
        assert_eq!(chrome.selected_template, TemplateId::Creative);
        assert_eq!(chrome.actions, ExportAction::ALL);
    }

    #[test]
    fn test_titles_carry_template_case() {
        let doc = document();
        let order = SectionOrder::default();
        let modern = render_content(&doc, &order, resolve("modern"));
        let classic = render_content(&doc, &order, resolve("classic"));
        assert_eq!(modern.sections[0].title, "SUMMARY");
        assert_eq!(classic.sections[0].title, "Summary");
    }
}
