//! Reads and writes the resume, its view settings, and published shares.
//!
//! Reads never fail: an absent key or unparseable value is the normal empty
//! state and is only logged. Writes propagate store errors to the caller.

pub mod handlers;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::resume::ResumeDocument;
use crate::models::share::PublicShare;
use crate::models::view::ViewSettings;
use crate::order::SectionOrder;
use crate::store::{KeyValueStore, StoreError, Subscription};
use crate::templates::TemplateId;

pub const RESUME_DATA_KEY: &str = "resumeData";
pub const RESUME_TEMPLATE_KEY: &str = "resumeTemplate";
pub const RESUME_SECTION_ORDER_KEY: &str = "resumeSectionOrder";

pub fn public_resume_key(id: &str) -> String {
    format!("publicResume_{id}")
}

pub fn public_template_key(id: &str) -> String {
    format!("publicResumeTemplate_{id}")
}

pub fn public_section_order_key(id: &str) -> String {
    format!("publicResumeSectionOrder_{id}")
}

#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ── Live document ──────────────────────────────────────────────────────

    pub async fn load_document(&self) -> Option<ResumeDocument> {
        self.read_json(RESUME_DATA_KEY).await
    }

    pub async fn save_document(&self, document: &ResumeDocument) -> Result<(), StoreError> {
        let raw = serde_json::to_string(document)?;
        self.store.set(RESUME_DATA_KEY, raw).await?;
        debug!("Saved resume document");
        Ok(())
    }

    pub fn subscribe_document(&self) -> Subscription {
        self.store.subscribe(RESUME_DATA_KEY)
    }

    // ── View settings ──────────────────────────────────────────────────────

    pub async fn load_template(&self) -> TemplateId {
        self.read_template(RESUME_TEMPLATE_KEY).await
    }

    pub async fn save_template(&self, template: TemplateId) -> Result<(), StoreError> {
        self.store
            .set(RESUME_TEMPLATE_KEY, template.as_str().to_string())
            .await
    }

    pub async fn load_section_order(&self) -> SectionOrder {
        self.read_order(RESUME_SECTION_ORDER_KEY).await
    }

    pub async fn save_section_order(&self, order: &SectionOrder) -> Result<(), StoreError> {
        let raw = serde_json::to_string(order)?;
        self.store.set(RESUME_SECTION_ORDER_KEY, raw).await
    }

    pub async fn load_view_settings(&self) -> ViewSettings {
        ViewSettings {
            template_id: self.load_template().await,
            section_order: self.load_section_order().await,
        }
    }

    // ── Public shares ──────────────────────────────────────────────────────

    pub async fn save_share(&self, share: &PublicShare) -> Result<(), StoreError> {
        let document = serde_json::to_string(&share.document)?;
        let order = serde_json::to_string(&share.view.section_order)?;
        self.store.set(&public_resume_key(&share.id), document).await?;
        self.store
            .set(
                &public_template_key(&share.id),
                share.view.template_id.as_str().to_string(),
            )
            .await?;
        self.store
            .set(&public_section_order_key(&share.id), order)
            .await
    }

    /// The share's document is required; its template and order fall back to
    /// the defaults like the live view does.
    pub async fn load_share(&self, id: &str) -> Option<PublicShare> {
        let document = self.read_json(&public_resume_key(id)).await?;
        Some(PublicShare {
            id: id.to_string(),
            document,
            view: ViewSettings {
                template_id: self.read_template(&public_template_key(id)).await,
                section_order: self.read_order(&public_section_order_key(id)).await,
            },
        })
    }

    // ── Helpers ────────────────────────────────────────────────────────────

    async fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Reading '{key}' failed, treating as absent: {e}");
                None
            }
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored '{key}' is malformed, treating as absent: {e}");
                None
            }
        }
    }

    async fn read_template(&self, key: &str) -> TemplateId {
        self.read_raw(key)
            .await
            .map(|raw| TemplateId::parse(&raw))
            .unwrap_or_default()
    }

    async fn read_order(&self, key: &str) -> SectionOrder {
        match self.read_json::<Vec<String>>(key).await {
            Some(saved) => SectionOrder::restore(&saved),
            None => SectionOrder::default(),
        }
    }
}
