//! # Cart Actor
//!
//! This module implements the Cart resource actor: shopping carts kept one document per cart,
//! with line items referencing products in the catalog.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](store_actor::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`actions`] - [`CartAction`] and [`CartActionResult`] for line-item operations
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor is started with a [`ProductClient`] as its context:
//!
//! ```rust,ignore
//! let (cart_actor, cart_client) = cart_actor::new(32, storage, product_client.clone());
//! tokio::spawn(cart_actor.run(product_client));
//! ```
//!
//! The cart client keeps its own product client for
//! [`get_populated`](crate::clients::CartClient::get_populated).

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, ProductClient};
use crate::model::Cart;
use store_actor::storage::Storage;
use store_actor::ResourceActor;

/// Creates a new Cart actor over `storage` and its client.
///
/// The actor still has to be `run` with a `ProductClient` context.
pub fn new(
    capacity: usize,
    storage: impl Storage<Cart> + 'static,
    products: ProductClient,
) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, storage);
    (actor, CartClient::new(generic_client, products))
}
