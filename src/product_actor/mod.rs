//! # Product Actor
//!
//! This module implements the Product resource actor: the product catalog kept in one JSON
//! file.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](store_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use catalog_store::model::ProductCreate;
//! use catalog_store::product_actor;
//! use store_actor::storage::FileStorage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dir = std::env::temp_dir().join(format!("catalog-doc-{}", std::process::id()));
//!     let (actor, client) = product_actor::new(32, FileStorage::new(dir.join("products.json")));
//!
//!     // Start the actor (no dependencies, so context is ())
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate::new("Mug", "Ceramic mug", 12.5, "mug.png", "MUG-01", 4);
//!     let id = client.create_product(params).await?;
//!     assert_eq!(id.0, 1);
//!     # let _ = std::fs::remove_dir_all(dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **No dependencies**: Context = ()
//! - **Sequential ids**: `max id + 1`, allocated by the file storage
//! - **Unique codes**: checked by the actor on create and update

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use store_actor::storage::Storage;
use store_actor::ResourceActor;

/// Creates a new Product actor over `storage` and its client.
pub fn new(
    capacity: usize,
    storage: impl Storage<Product> + 'static,
) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, storage);
    (actor, ProductClient::new(generic_client))
}
