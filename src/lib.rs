//! # Catalog Store
//!
//! Persistence managers for a small e-commerce catalog, built on the generic
//! [`store_actor`] framework:
//!
//! - **Products** live in one JSON file, rewritten wholesale on every mutation. Ids are
//!   sequential (`max + 1`) and availability codes are unique.
//! - **Carts** live in a MongoDB collection, one document per cart, each holding line items
//!   that reference products.
//!
//! Each store is owned by a single actor, so concurrent callers can no longer interleave a
//! read-modify-write and lose an update.
//!
//! ## Module Tour
//!
//! - **[model]**: [`Product`](model::Product), [`Cart`](model::Cart) and their payloads
//! - **[product_actor]** / **[cart_actor]**: the entity implementations, actions and errors
//! - **[clients]**: [`ProductClient`](clients::ProductClient) and
//!   [`CartClient`](clients::CartClient), the API an HTTP layer would call
//! - **[lifecycle]**: [`CatalogSystem`](lifecycle::CatalogSystem) and
//!   [`StoreConfig`](lifecycle::StoreConfig)
//!
//! ## Errors
//!
//! Every operation returns a typed error ([`ProductError`](product_actor::ProductError) or
//! [`CartError`](cart_actor::CartError)) whose `kind()` tells validation failures, missing
//! records and storage failures apart. Looking up an unknown id is `Ok(None)`.
//!
//! ## Testing
//!
//! See [`store_actor::mock`] for utilities to test clients without spawning full actors.

pub mod cart_actor;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
