use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{error::StoreError, models::ChatMessage};

/// Append-only sink for received chat messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: ChatMessage) -> Result<(), StoreError>;
}

/// Keeps messages in process memory. Inserts can be made to fail with
/// [`MemoryStore::set_available`] to stand in for an unreachable datastore.
#[derive(Debug)]
pub struct MemoryStore {
    messages: Mutex<Vec<ChatMessage>>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            messages: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert(&self, message: ChatMessage) -> Result<(), StoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".to_owned()));
        }
        self.messages.lock().push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> ChatMessage {
        ChatMessage {
            date: "2024-01-01 00:00:00.000000".to_owned(),
            username: "alice".to_owned(),
            message: text.to_owned(),
        }
    }

    #[actix_web::test]
    async fn keeps_insertion_order() {
        let store = MemoryStore::new();
        store.insert(message("one")).await.unwrap();
        store.insert(message("two")).await.unwrap();

        let texts: Vec<_> = store.messages().into_iter().map(|m| m.message).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[actix_web::test]
    async fn unavailable_store_rejects_inserts() {
        let store = MemoryStore::new();
        store.set_available(false);

        let err = store.insert(message("lost")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(store.messages().is_empty());

        store.set_available(true);
        store.insert(message("kept")).await.unwrap();
        assert_eq!(store.messages().len(), 1);
    }
}
