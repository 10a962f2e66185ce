//! Error types for the Cart actor.

use crate::model::ProductId;
use crate::product_actor::ProductError;
use store_actor::{ErrorKind, FrameworkError};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested cart was not found.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// A line item references a product the catalog does not have.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The cart has no line item for this product.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// Two line items for the same product in one payload.
    #[error("Duplicate line item for {0}")]
    DuplicateLineItem(ProductId),

    /// Line item quantities start at 1.
    #[error("Invalid quantity {quantity} for {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// Adding one more unit would overflow the line item's quantity.
    #[error("Quantity of {0} is already at its maximum")]
    QuantityOverflow(ProductId),

    /// A cart id that is not a valid ObjectId.
    #[error("Invalid cart id: {0}")]
    InvalidId(String),

    /// The cart collection could not be read or written.
    #[error("Cart storage error: {0}")]
    Storage(String),

    /// The product store failed while the cart was checking a reference.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound(_)
            | CartError::ProductNotFound(_)
            | CartError::ProductNotInCart(_) => ErrorKind::NotFound,
            CartError::DuplicateLineItem(_)
            | CartError::InvalidQuantity { .. }
            | CartError::QuantityOverflow(_)
            | CartError::InvalidId(_) => ErrorKind::Validation,
            CartError::Product(e) => e.kind(),
            CartError::Storage(_) | CartError::ActorCommunicationError(_) => ErrorKind::Storage,
        }
    }
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            FrameworkError::Storage(e) => CartError::Storage(e.to_string()),
            FrameworkError::EntityError(inner) => match inner.downcast::<CartError>() {
                Ok(err) => *err,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            e @ (FrameworkError::ActorClosed
            | FrameworkError::ActorDropped
            | FrameworkError::Conflict(_)) => CartError::ActorCommunicationError(e.to_string()),
        }
    }
}
