//! Print export: the static resume page with a print stylesheet that opens
//! the platform print dialog on load.

use handlebars::RenderError;

use crate::models::resume::ResumeDocument;
use crate::models::view::ViewSettings;
use crate::render::html::Views;
use crate::render::{render, RenderMode};
use crate::templates::bundle;

pub const PRINT_TITLE: &str = "resume";

pub fn print_document(
    views: &Views,
    document: &ResumeDocument,
    view: &ViewSettings,
) -> Result<String, RenderError> {
    let tree = render(
        document,
        &view.section_order,
        bundle(view.template_id),
        RenderMode::Static,
    );
    views.resume_page(PRINT_TITLE, &tree, &[], true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;

    #[test]
    fn test_print_document_is_static_and_prints_on_load() {
        let views = Views::new().unwrap();
        let mut document = ResumeDocument::default();
        document.summary = "Ready to print.".to_string();
        let view = ViewSettings {
            template_id: TemplateId::Classic,
            ..ViewSettings::default()
        };
        let html = print_document(&views, &document, &view).unwrap();
        assert!(html.contains("Ready to print."));
        assert!(html.contains("window.print()"));
        assert!(html.contains("@media print"));
        assert!(!html.contains("draggable=\"true\""));
    }
}
