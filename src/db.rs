
use async_trait::async_trait;
use mongodb::{Client, Collection};

use crate::{error::StoreError, models::ChatMessage, store::MessageStore};

pub const COLLECTION: &str = "messages";

/// Message store backed by a single MongoDB collection handle, shared by every
/// connection. The driver pools connections internally.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<ChatMessage>,
}

pub async fn connect(uri: &str, database: &str) -> Result<MongoStore, StoreError> {
    let client = Client::with_uri_str(uri).await?;
    let collection = client.database(database).collection::<ChatMessage>(COLLECTION);
    Ok(MongoStore { collection })
}

#[async_trait]
impl MessageStore for MongoStore {
    async fn insert(&self, message: ChatMessage) -> Result<(), StoreError> {
        self.collection.insert_one(message).await?;
        Ok(())
    }
}
