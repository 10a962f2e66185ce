use super::{Storage, StorageError};
use crate::entity::ActorEntity;
use async_trait::async_trait;

/// An ordered in-memory collection. Nothing survives the actor.
///
/// Ids come from the generator passed to [`MemoryStorage::new`], which makes this backend
/// a drop-in stand-in for a database that assigns its own ids.
pub struct MemoryStorage<T: ActorEntity> {
    items: Vec<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> MemoryStorage<T> {
    pub fn new(next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        }
    }
}

#[async_trait]
impl<T: ActorEntity> Storage<T> for MemoryStorage<T> {
    async fn load_all(&mut self) -> Result<Vec<T>, StorageError> {
        Ok(self.items.clone())
    }

    async fn find(&mut self, id: &T::Id) -> Result<Option<T>, StorageError> {
        Ok(self.items.iter().find(|item| item.id() == id).cloned())
    }

    async fn next_id(&mut self) -> Result<T::Id, StorageError> {
        Ok((self.next_id_fn)())
    }

    async fn insert(&mut self, item: T) -> Result<(), StorageError> {
        self.items.push(item);
        Ok(())
    }

    async fn replace(&mut self, item: T) -> Result<bool, StorageError> {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError> {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        Ok(self.items.len() != before)
    }
}
