//! Publishing: a read-only snapshot of the current resume under a fresh id.
//!
//! The snapshot is taken at publish time. Later edits to the live document do
//! not reach an existing share.

pub mod handlers;

use serde::Serialize;
use uuid::Uuid;

use crate::models::share::PublicShare;
use crate::persistence::Persistence;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLink {
    pub id: String,
    pub url: String,
}

pub fn share_url(base_url: &str, id: &str) -> String {
    format!("{}/resume/{id}", base_url.trim_end_matches('/'))
}

/// Snapshots the saved document and view settings. `None` when there is no
/// document to publish.
pub async fn publish(
    persistence: &Persistence,
    base_url: &str,
) -> Result<Option<ShareLink>, StoreError> {
    let Some(document) = persistence.load_document().await else {
        return Ok(None);
    };
    let share = PublicShare {
        id: Uuid::new_v4().simple().to_string(),
        document,
        view: persistence.load_view_settings().await,
    };
    persistence.save_share(&share).await?;
    tracing::info!(id = %share.id, "Published resume");
    Ok(Some(ShareLink {
        url: share_url(base_url, &share.id),
        id: share.id,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::resume::{ResumeDocument, Section};
    use crate::store::MemoryStore;
    use crate::templates::TemplateId;

    fn persistence() -> Persistence {
        Persistence::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_nothing_to_publish() {
        assert_eq!(publish(&persistence(), "http://localhost:8080").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_share_is_a_snapshot() {
        let p = persistence();
        let mut doc = ResumeDocument::default();
        doc.summary = "Before".to_string();
        p.save_document(&doc).await.unwrap();
        p.save_template(TemplateId::Creative).await.unwrap();
        let mut order = p.load_section_order().await;
        order.reorder(Section::Languages, Section::Summary);
        p.save_section_order(&order).await.unwrap();

        let link = publish(&p, "http://localhost:8080/").await.unwrap().unwrap();
        assert_eq!(link.url, format!("http://localhost:8080/resume/{}", link.id));

        doc.summary = "After".to_string();
        p.save_document(&doc).await.unwrap();

        let share = p.load_share(&link.id).await.unwrap();
        assert_eq!(share.document.summary, "Before");
        assert_eq!(share.view.template_id, TemplateId::Creative);
        assert_eq!(share.view.section_order.as_slice()[0], Section::Languages);
    }

    #[tokio::test]
    async fn test_each_publish_gets_a_new_id() {
        let p = persistence();
        p.save_document(&ResumeDocument::default()).await.unwrap();
        let a = publish(&p, "http://localhost:8080").await.unwrap().unwrap();
        let b = publish(&p, "http://localhost:8080").await.unwrap().unwrap();
        assert_ne!(a.id, b.id);
    }
}
