//! Pure data structures (DTOs) implementing the [`ActorEntity`](store_actor::ActorEntity) trait.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
