//! Error types for the Product actor.

use store_actor::{ErrorKind, FrameworkError};
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A required field was absent from the payload.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but its value is not acceptable.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Another product already uses this code.
    #[error("Product code already exists: {0}")]
    DuplicateCode(String),

    /// The product file could not be read or written.
    #[error("Product storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub(crate) fn empty(field: &'static str) -> Self {
        ProductError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::MissingField(_)
            | ProductError::InvalidField { .. }
            | ProductError::DuplicateCode(_) => ErrorKind::Validation,
            ProductError::Storage(_) | ProductError::ActorCommunicationError(_) => {
                ErrorKind::Storage
            }
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Conflict(code) => ProductError::DuplicateCode(code),
            FrameworkError::Storage(e) => ProductError::Storage(e.to_string()),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(err) => *err,
                Err(other) => ProductError::ActorCommunicationError(other.to_string()),
            },
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                ProductError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
