//! # Storage Backends
//!
//! A [`Storage`] is where a `ResourceActor` keeps its records. The actor owns its storage
//! exclusively, so a backend never needs its own locking: every call happens inside the
//! actor's sequential message loop.
//!
//! | Backend | Ids | Persistence |
//! |---------|-----|-------------|
//! | [`FileStorage`] | `max + 1` ([`SequentialId`]) | one JSON array, rewritten per mutation |
//! | [`MongoStorage`] | `ObjectId` ([`DocumentId`]) | one document per record |
//! | [`MemoryStorage`] | caller-supplied generator | none |

mod file;
mod memory;
mod mongo;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use mongo::{DocumentId, MongoStorage};

use crate::entity::ActorEntity;
use async_trait::async_trait;
use std::path::PathBuf;

/// Failures reading or writing a backing store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed data in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Document encoding failed: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
    #[error("No id left after {0}")]
    IdsExhausted(String),
}

/// Identifiers allocated as "one greater than the largest existing id".
pub trait SequentialId: Ord + Clone + std::fmt::Display {
    /// The id given to the first record of an empty collection.
    fn first() -> Self;

    /// The id following `self`, or `None` once the id space is used up.
    fn successor(&self) -> Option<Self>;
}

/// A persistent collection of `T` records.
///
/// Lookups have default implementations that scan [`Storage::load_all`]; backends with an
/// index override them.
#[async_trait]
pub trait Storage<T: ActorEntity>: Send {
    /// Every record, in stored order.
    async fn load_all(&mut self) -> Result<Vec<T>, StorageError>;

    async fn find(&mut self, id: &T::Id) -> Result<Option<T>, StorageError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|item| item.id() == id))
    }

    /// The record whose [`ActorEntity::unique_key`] equals `key`.
    async fn find_by_key(&mut self, key: &str) -> Result<Option<T>, StorageError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|item| item.unique_key() == Some(key)))
    }

    /// Allocate the id for the next record.
    async fn next_id(&mut self) -> Result<T::Id, StorageError>;

    /// Append a new record.
    async fn insert(&mut self, item: T) -> Result<(), StorageError>;

    /// Overwrite the record with the same id. Returns `false` if there is none.
    async fn replace(&mut self, item: T) -> Result<bool, StorageError>;

    /// Remove the record with this id. Returns `false` if there is none.
    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError>;
}
