//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single writer in front of a storage
//! backend. It processes messages sequentially, so every read-check-write sequence
//! (uniqueness check then insert, load then merge then save) runs without interference from
//! other callers.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::storage::Storage;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that owns one persistent collection.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the storage backend and the
/// receiver end of the channel. Any number of `ResourceClient` clones can send requests;
/// they are handled one at a time in arrival order, which is what makes the backend safe
/// without a `Mutex`.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(buffer, storage)` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use store_actor::storage::MemoryStorage;
/// use store_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, label: String }
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32;
///     type Create = String;
///     type Update = String;
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, label: String) -> Result<Self, TagError> { Ok(Self { id, label }) }
///     async fn on_update(&mut self, label: String, _: &()) -> Result<(), TagError> { self.label = label; Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let storage = MemoryStorage::new(|| 7);
///     let (actor, client) = ResourceActor::<Tag>::new(10, storage);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create("rust".into()).await.unwrap();
///     assert_eq!(id, 7);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: allocate an id from storage, build the entity (`from_create_params`),
///   run `on_create`, reject a duplicate `unique_key`, insert.
/// * **Get** / **List**: read straight from storage.
/// * **Update**: load, `on_update`, reject a `unique_key` now owned by another record,
///   replace.
/// * **Delete**: load, `on_delete`, remove.
/// * **Action**: load, `handle_action`, replace, return the action result.
///
/// A request that fails at any step leaves the stored collection as it was.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    storage: Box<dyn Storage<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` over `storage` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client calls
    /// wait for space.
    pub fn new(
        buffer_size: usize,
        storage: impl Storage<T> + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            storage: Box::new(storage),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. Dependencies created
    /// after this actor (such as the client of another actor) can be wired in here.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Cart" instead of "catalog_store::model::cart::Cart"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, "Created"),
                        Err(e) => report(entity_type, "Create failed", e),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self.storage.find(&id).await.map_err(FrameworkError::from);
                    match &result {
                        Ok(item) => debug!(entity_type, %id, found = item.is_some(), "Get"),
                        Err(e) => report(entity_type, "Get failed", e),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { respond_to } => {
                    let result = self.storage.load_all().await.map_err(FrameworkError::from);
                    match &result {
                        Ok(items) => debug!(entity_type, size = items.len(), "List"),
                        Err(e) => report(entity_type, "List failed", e),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => report(entity_type, "Update failed", e),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, "Deleted"),
                        Err(e) => report(entity_type, "Delete failed", e),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => report(entity_type, "Action failed", e),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let id = self.storage.next_id().await?;
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;

        if let Some(key) = item.unique_key() {
            if self.storage.find_by_key(key).await?.is_some() {
                return Err(FrameworkError::Conflict(key.to_string()));
            }
        }

        self.storage.insert(item).await?;
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = self.load(id).await?;
        item.on_update(update, context).await.map_err(entity_error)?;

        if let Some(key) = item.unique_key() {
            if let Some(owner) = self.storage.find_by_key(key).await? {
                if owner.id() != id {
                    return Err(FrameworkError::Conflict(key.to_string()));
                }
            }
        }

        self.save(item.clone()).await?;
        Ok(item)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = self.load(id).await?;
        item.on_delete(context).await.map_err(entity_error)?;
        if !self.storage.remove(id).await? {
            return Err(FrameworkError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut item = self.load(id).await?;
        let result = item
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;
        self.save(item).await?;
        Ok(result)
    }

    async fn load(&mut self, id: &T::Id) -> Result<T, FrameworkError> {
        self.storage
            .find(id)
            .await?
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    async fn save(&mut self, item: T) -> Result<(), FrameworkError> {
        let id = item.id().clone();
        if !self.storage.replace(item).await? {
            return Err(FrameworkError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

fn report(entity_type: &str, message: &str, e: &FrameworkError) {
    match e {
        FrameworkError::Storage(_) => error!(entity_type, error = %e, "{message}"),
        _ => warn!(entity_type, error = %e, "{message}"),
    }
}
