//! # System Lifecycle & Orchestration
//!
//! This module starts, wires and stops the catalog's two actors.
//!
//! ## The CatalogSystem Pattern
//!
//! ```rust,ignore
//! // 1. Create actors (no dependencies yet)
//! let (product_actor, product_client) = product_actor::new(capacity, product_storage);
//! let (cart_actor, cart_client) = cart_actor::new(capacity, cart_storage, product_client.clone());
//!
//! // 2. Start actors with their dependencies injected
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(cart_actor.run(product_client.clone()));
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Dependencies are injected when an actor starts, via `run(context)`, not when it is
//! constructed. The cart actor's `Context` is a [`ProductClient`](crate::clients::ProductClient),
//! which its hooks use to check that referenced products exist.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None` once the queue is drained
//! 3. **Await completion** - wait for both actor tasks
//!
//! The dependency graph (cart → product) is acyclic, so closing the channels is enough.
//!
//! ## Configuration
//!
//! [`StoreConfig`] says where the product file lives and which backend holds carts. See
//! the [`config`] module for the file format and environment overrides.
//!
//! ## Observability
//!
//! Call [`store_actor::tracing::setup_tracing`] once at startup; `RUST_LOG` picks the level.

pub mod catalog_system;
pub mod config;

pub use catalog_system::*;
pub use config::*;
