use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ChangeFeed, KeyValueStore, StoreError, Subscription};

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    feed: ChangeFeed,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        self.feed.publish(key, &value);
        Ok(())
    }

    fn subscribe(&self, key: &str) -> Subscription {
        self.feed.subscribe(key)
    }
}
