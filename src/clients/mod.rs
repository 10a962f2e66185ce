//! Type-safe wrappers around [`ResourceClient`](store_actor::ResourceClient).

pub mod cart_client;
pub mod product_client;

pub use cart_client::*;
pub use product_client::*;
