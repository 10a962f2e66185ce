//! Custom actions for the Cart actor.
//!
//! This module defines the line-item operations that can be performed on a
//! [`Cart`](crate::model::Cart) beyond standard CRUD. They are handled by
//! [`ActorEntity::handle_action`](store_actor::ActorEntity::handle_action) inside the cart
//! actor, so the read-modify-write of the line items is never interleaved with another
//! request on the same store.

use crate::model::ProductId;

/// Custom actions for Cart entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of a product: increments its line item, or inserts one at quantity 1.
    ///
    /// # Errors
    /// Fails if the product does not exist in the product store.
    AddProduct(ProductId),
    /// Removes a product's line item entirely.
    RemoveProduct(ProductId),
    /// Sets the quantity of an existing line item. Zero is rejected; use `RemoveProduct`.
    SetQuantity { product_id: ProductId, quantity: u32 },
    /// Removes every line item.
    Clear,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The line item's quantity after the addition
    AddProduct(u32),
    RemoveProduct(()),
    SetQuantity(()),
    /// How many line items were removed
    Clear(usize),
}
