//! # Store Actor
//!
//! Generic building blocks for persistence managers: one **actor** per collection, in front
//! of a pluggable **storage** backend, reached through a cloneable **client**.
//!
//! ## Why an actor in front of a store?
//!
//! A whole-file JSON store, or a document store updated with read-modify-write, loses
//! writes when two callers interleave: both read the old snapshot and the second write
//! discards the first. Putting the store behind a single task that handles one request at a
//! time turns every operation into a critical section without any locks:
//!
//! - the uniqueness check and the insert of a `Create` cannot be split by another request;
//! - the load, merge and save of an `Update` or `Action` see no concurrent writer.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record, its DTOs, validation and actions
//! 2. **Storage Layer** ([`storage::Storage`]) - JSON file, MongoDB collection or memory
//! 3. **Runtime Layer** ([`ResourceActor`]) - sequential message processing
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe requests
//!
//! ## Error Model
//!
//! Every request answers with `Result<_, FrameworkError>`. Missing records are
//! [`FrameworkError::NotFound`], duplicate unique keys [`FrameworkError::Conflict`], backend
//! failures [`FrameworkError::Storage`], and errors raised by the entity's own hooks travel
//! boxed in [`FrameworkError::EntityError`] so the typed client can downcast them back.
//! A plain `get` of an unknown id is `Ok(None)`, never an error.
//!
//! ## Quick Example
//!
//! ```rust
//! use store_actor::storage::FileStorage;
//! use store_actor::storage::SequentialId;
//! use store_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
//! struct NoteId(u32);
//! impl std::fmt::Display for NoteId {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "note_{}", self.0) }
//! }
//! impl SequentialId for NoteId {
//!     fn first() -> Self { NoteId(1) }
//!     fn successor(&self) -> Option<Self> { self.0.checked_add(1).map(NoteId) }
//! }
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Note { id: NoteId, text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = NoteId; type Create = String; type Update = String;
//!     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn id(&self) -> &NoteId { &self.id }
//!     fn from_create_params(id: NoteId, text: String) -> Result<Self, NoteError> { Ok(Self { id, text }) }
//!     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> { self.text = text; Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let dir = std::env::temp_dir().join(format!("notes-{}", std::process::id()));
//!     let (actor, client) = ResourceActor::<Note>::new(16, FileStorage::new(dir.join("notes.json")));
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create("hello".into()).await.unwrap();
//!     let note = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(note.text, "hello");
//!     # let _ = std::fs::remove_dir_all(dir);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, so a client wrapper
//! or an actor that depends on another actor can be tested without spawning the real thing.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod storage;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{ErrorKind, FrameworkError};
pub use message::{ResourceRequest, Response};
