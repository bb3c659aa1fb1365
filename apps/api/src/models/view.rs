use serde::{Deserialize, Serialize};

use crate::order::SectionOrder;
use crate::templates::TemplateId;

/// Presentation choices kept apart from the document itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    pub template_id: TemplateId,
    pub section_order: SectionOrder,
}
