//! HTML serialization of render trees through the handlebars views in `views/`.
//!
//! Every interpolated value goes through handlebars' HTML escaping; nothing
//! from the document is emitted raw.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

use crate::models::resume::ResumeDocument;
use crate::render::{ContentTree, ExportAction, RenderTree};
use crate::sections::{registry, SectionShape};
use crate::templates::TemplateId;

pub const NO_RESUME_MESSAGE: &str = "No resume data found. Please fill out your resume first.";
pub const NO_PUBLIC_RESUME_MESSAGE: &str = "No public resume found for this link.";

/// Actions on the static download view.
pub const DOWNLOAD_ACTIONS: [ExportAction; 3] =
    [ExportAction::Pdf, ExportAction::Png, ExportAction::Print];

const PAGE: &str = include_str!("../../views/page.hbs");
const RESUME: &str = include_str!("../../views/resume.hbs");
const HOME: &str = include_str!("../../views/home.hbs");
const BUILDER: &str = include_str!("../../views/builder.hbs");

#[derive(Serialize)]
struct StyleCss {
    font: &'static str,
    body_color: String,
    accent_color: String,
    section_spacing: f32,
    title_transform: &'static str,
    divider: String,
}

impl StyleCss {
    fn of(content: &ContentTree) -> Self {
        let style = content.style;
        Self {
            font: style.typeface,
            body_color: style.body_color.hex(),
            accent_color: style.accent_color.hex(),
            section_spacing: style.section_spacing_px,
            title_transform: style.section_title_case.css(),
            divider: style.section_divider_style.css(),
        }
    }
}

#[derive(Serialize)]
struct TemplateOption {
    id: TemplateId,
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct InteractiveView {
    templates: Vec<TemplateOption>,
}

#[derive(Serialize)]
struct ActionView {
    kind: ExportAction,
    label: &'static str,
    href: &'static str,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    css: Option<StyleCss>,
    content: Option<&'a ContentTree>,
    interactive: Option<InteractiveView>,
    actions: Vec<ActionView>,
    print: bool,
    message: Option<&'a str>,
}

#[derive(Serialize)]
struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        title: "Modern & Intuitive",
        description: "Enjoy a clean, user-friendly interface with real-time editing and live preview.",
    },
    Feature {
        title: "One-Click Download",
        description: "Export your resume as PDF or PNG with a single click, ready for job applications.",
    },
    Feature {
        title: "Shareable Link",
        description: "Generate a public link to share your resume with recruiters or friends instantly.",
    },
    Feature {
        title: "Customizable Templates",
        description: "Pick from multiple beautiful templates and color themes to match your style.",
    },
];

#[derive(Serialize)]
struct BuilderStep {
    name: &'static str,
    slug: &'static str,
    shape: SectionShape,
    empty: bool,
}

/// Compiled view registry, built once at startup.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("resume", RESUME)?;
        registry.register_template_string("page", PAGE)?;
        registry.register_template_string("home", HOME)?;
        registry.register_template_string("builder", BUILDER)?;
        Ok(Self { registry })
    }

    /// A resume page. Interactive trees get the template selector, drag
    /// handles, and their chrome's actions; static trees get `actions`.
    pub fn resume_page(
        &self,
        title: &str,
        tree: &RenderTree,
        actions: &[ExportAction],
        print: bool,
    ) -> Result<String, RenderError> {
        let (interactive, actions) = match &tree.chrome {
            Some(chrome) => (
                Some(InteractiveView {
                    templates: TemplateId::ALL
                        .iter()
                        .map(|id| TemplateOption {
                            id: *id,
                            label: id.label(),
                            selected: *id == chrome.selected_template,
                        })
                        .collect(),
                }),
                chrome.actions.as_slice(),
            ),
            None => (None, actions),
        };
        let context = PageContext {
            title,
            css: Some(StyleCss::of(&tree.content)),
            content: Some(&tree.content),
            interactive,
            actions: actions
                .iter()
                .map(|a| ActionView {
                    kind: *a,
                    label: a.label(),
                    href: a.href(),
                })
                .collect(),
            print,
            message: None,
        };
        self.registry.render("page", &context)
    }

    /// Centered one-line page for the empty states.
    pub fn message_page(&self, title: &str, message: &str) -> Result<String, RenderError> {
        let context = PageContext {
            title,
            css: None,
            content: None,
            interactive: None,
            actions: Vec::new(),
            print: false,
            message: Some(message),
        };
        self.registry.render("page", &context)
    }

    pub fn home(&self) -> Result<String, RenderError> {
        self.registry
            .render("home", &serde_json::json!({ "features": FEATURES }))
    }

    pub fn builder(&self, document: &ResumeDocument) -> Result<String, RenderError> {
        let steps: Vec<BuilderStep> = registry()
            .iter()
            .map(|spec| BuilderStep {
                name: spec.section.name(),
                slug: spec.section.slug(),
                shape: spec.shape,
                empty: document.is_section_empty(spec.section),
            })
            .collect();
        self.registry
            .render("builder", &serde_json::json!({ "steps": steps }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Section;
    use crate::order::SectionOrder;
    use crate::render::{render, RenderMode};
    use crate::templates::resolve;

    fn document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "<script>alert(1)</script>".to_string();
        doc.summary = "Builds things & ships them.".to_string();
        doc.skills.add("Rust");
        doc
    }

    #[test]
    fn test_document_text_is_escaped() {
        let views = Views::new().unwrap();
        let tree = render(
            &document(),
            &SectionOrder::default(),
            resolve("modern"),
            RenderMode::Static,
        );
        let html = views.resume_page("Resume", &tree, &[], false).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Builds things &amp; ships them."));
    }

    #[test]
    fn test_interactive_page_has_drag_handles_and_selector() {
        let views = Views::new().unwrap();
        let tree = render(
            &document(),
            &SectionOrder::default(),
            resolve("classic"),
            RenderMode::Interactive,
        );
        let html = views.resume_page("Preview", &tree, &[], false).unwrap();
        assert!(html.contains("draggable=\"true\""));
        assert!(html.contains("<option value=\"classic\" selected>"));
        assert!(html.contains("/api/v1/ats"));
        assert!(html.contains("EventSource"));
    }

    #[test]
    fn test_static_page_has_no_drag_handles() {
        let views = Views::new().unwrap();
        let tree = render(
            &document(),
            &SectionOrder::default(),
            resolve("modern"),
            RenderMode::Static,
        );
        let html = views
            .resume_page("Download", &tree, &DOWNLOAD_ACTIONS, false)
            .unwrap();
        assert!(!html.contains("draggable=\"true\""));
        assert!(html.contains("/api/v1/export/pdf"));
        assert!(!html.contains("/api/v1/ats"));
    }

    #[test]
    fn test_sections_render_in_order() {
        let views = Views::new().unwrap();
        let mut order = SectionOrder::default();
        order.reorder(Section::Skills, Section::Summary);
        let tree = render(&document(), &order, resolve("modern"), RenderMode::Static);
        let html = views.resume_page("Resume", &tree, &[], false).unwrap();
        let skills = html.find("data-section=\"Skills\"").unwrap();
        let summary = html.find("data-section=\"Summary\"").unwrap();
        assert!(skills < summary);
    }

    #[test]
    fn test_unsafe_project_link_is_not_clickable() {
        let views = Views::new().unwrap();
        let mut doc = document();
        for link in ["javascript:alert(1)", "https://example.com/demo"] {
            doc.projects.push(crate::models::resume::Project {
                title: "Demo".to_string(),
                link: link.to_string(),
                ..Default::default()
            });
        }
        let tree = render(&doc, &SectionOrder::default(), resolve("modern"), RenderMode::Static);
        let html = views.resume_page("Resume", &tree, &[], false).unwrap();
        assert!(!html.contains("href=\"javascript:"));
        assert!(html.contains("<div>javascript:alert(1)</div>"));
        assert!(html.contains("<a href=\"https://example.com/demo\">"));
    }

    #[test]
    fn test_print_page_triggers_print() {
        let views = Views::new().unwrap();
        let tree = render(
            &document(),
            &SectionOrder::default(),
            resolve("creative"),
            RenderMode::Static,
        );
        let html = views.resume_page("Print", &tree, &[], true).unwrap();
        assert!(html.contains("window.print()"));
    }

    #[test]
    fn test_message_page() {
        let views = Views::new().unwrap();
        let html = views.message_page("Preview", NO_RESUME_MESSAGE).unwrap();
        assert!(html.contains(NO_RESUME_MESSAGE));
        assert!(!html.contains("class=\"resume\""));
    }

    #[test]
    fn test_builder_lists_every_step() {
        let views = Views::new().unwrap();
        let html = views.builder(&document()).unwrap();
        for spec in registry() {
            assert!(html.contains(spec.section.slug()));
        }
    }
}
