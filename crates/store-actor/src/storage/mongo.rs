//! Document storage on a MongoDB collection.

use super::{Storage, StorageError};
use crate::entity::ActorEntity;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Identifiers minted on the client in the database's native format (an `ObjectId`), so
/// the id is known before the insert round-trip.
pub trait DocumentId {
    fn generate() -> Self;

    /// The value stored in the `_id` field.
    fn to_bson(&self) -> Bson;
}

/// A collection where each record is one document keyed by `_id`.
///
/// Lookups are single `_id` queries. Replacements go through `findOneAndUpdate` with a
/// `$set` of every field except `_id`; the actor serialises callers, so the read of the
/// current record and that write cannot interleave with another request.
pub struct MongoStorage<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T: Send + Sync> MongoStorage<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Connect to `uri` and use `database.collection`.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri).await?;
        info!(database, collection, "Connected to MongoDB");
        Ok(Self::new(client.database(database).collection(collection)))
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }
}

#[async_trait]
impl<T> Storage<T> for MongoStorage<T>
where
    T: ActorEntity + Serialize + DeserializeOwned + Unpin,
    T::Id: DocumentId,
{
    async fn load_all(&mut self) -> Result<Vec<T>, StorageError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<T>>().await?)
    }

    async fn find(&mut self, id: &T::Id) -> Result<Option<T>, StorageError> {
        Ok(self.collection.find_one(doc! { "_id": id.to_bson() }).await?)
    }

    async fn next_id(&mut self) -> Result<T::Id, StorageError> {
        Ok(<T::Id as DocumentId>::generate())
    }

    async fn insert(&mut self, item: T) -> Result<(), StorageError> {
        let result = self.collection.insert_one(&item).await?;
        debug!(inserted_id = %result.inserted_id, "Document inserted");
        Ok(())
    }

    async fn replace(&mut self, item: T) -> Result<bool, StorageError> {
        let mut fields = mongodb::bson::to_document(&item)?;
        fields.remove("_id");

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": item.id().to_bson() }, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.is_some())
    }

    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_bson() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
