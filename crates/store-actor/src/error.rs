//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus [`ErrorKind`], the three-way
//! classification every domain error reports to its caller.

use crate::storage::StorageError;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// What went wrong, from the caller's point of view.
///
/// Domain errors (`ProductError`, `CartError`) expose a `kind()` so an outer layer can map
/// them to a response without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is invalid: missing field, duplicate key, bad quantity.
    Validation,
    /// The addressed record does not exist.
    NotFound,
    /// The store could not be read or written, or the actor is gone.
    Storage,
}
