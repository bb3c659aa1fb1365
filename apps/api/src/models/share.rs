use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;
use crate::models::view::ViewSettings;

/// A published, read-only snapshot of a resume and how it was displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicShare {
    pub id: String,
    pub document: ResumeDocument,
    pub view: ViewSettings,
}
