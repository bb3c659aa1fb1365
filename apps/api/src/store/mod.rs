//! Key-value store injected into every component that persists something.
//!
//! Values are raw strings (mostly JSON). Every `set` is broadcast to the
//! subscribers of that key, which is how open views learn that the document
//! changed elsewhere. There is no conflict resolution: the last write wins.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Capacity of the change channel. Slow subscribers skip ahead when it overflows.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("store write task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Change notifications for one key.
    fn subscribe(&self, key: &str) -> Subscription;
}

/// A single change: `key` now holds `value`.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub key: String,
    pub value: String,
}

/// Fan-out of store writes, shared by the store implementations.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<StoreEvent>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl ChangeFeed {
    pub fn publish(&self, key: &str, value: &str) {
        // No receivers is the common case; nothing to do.
        let _ = self.tx.send(StoreEvent {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub fn subscribe(&self, key: &str) -> Subscription {
        Subscription {
            key: key.to_string(),
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiver for the changes of one key.
pub struct Subscription {
    key: String,
    rx: broadcast::Receiver<StoreEvent>,
}

impl Subscription {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Waits for the next write to this key and returns the new value.
    /// `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<String> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.key == self.key => return Some(event.value),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("Subscription to '{}' skipped {skipped} events", self.key);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
