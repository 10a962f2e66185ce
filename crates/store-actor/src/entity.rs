//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every persisted resource (Product, Cart, …)
//! implements to be served by the generic `ResourceActor`. It specifies associated types for
//! IDs, DTOs, actions, context and errors, and provides lifecycle hooks (`on_create`,
//! `on_update`, `on_delete`, `handle_action`).
//!
//! The entity only describes *what* a record is and how it changes. *Where* it lives is the
//! business of a [`Storage`](crate::storage::Storage) backend, so the same entity can be kept
//! in a JSON file, a MongoDB collection or memory without touching its code.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::unique_key`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The defaults do nothing (`None` / `Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` type is injected into every
/// hook when the actor starts (`run(context)`), not when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity. Assigned by the storage backend.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `AddProduct`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per entity rather than one per message: clients match on a single
    /// `ProductError` or `CartError` whatever the operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Natural key that must stay unique across the collection, if the entity has one.
    ///
    /// The actor rejects creates and updates that would produce a second record with the
    /// same key.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Construct the full entity from the allocated ID and the payload.
    /// Called synchronously before `on_create`; this is where required fields are validated.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is persisted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Merge an update into the entity. The actor persists the result only if this succeeds.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from storage.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action. A successful action is persisted.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
