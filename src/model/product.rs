/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](store_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](store_actor::ResourceActor) over a
/// [`FileStorage`](store_actor::storage::FileStorage).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use store_actor::storage::SequentialId;

/// Type-safe identifier for Products.
///
/// Serialized as the bare number, the way the product file and request paths carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

impl SequentialId for ProductId {
    fn first() -> Self {
        Self(1)
    }

    fn successor(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    /// Availability code, unique across the catalog.
    pub code: String,
    pub stock: u32,
}

/// Payload for creating a new product.
///
/// Every field is optional so a request body with a missing field still deserializes and
/// the store can report which field is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<u32>,
}

impl ProductCreate {
    /// A payload with every field present.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        thumbnail: impl Into<String>,
        code: impl Into<String>,
        stock: u32,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            price: Some(price),
            thumbnail: Some(thumbnail.into()),
            code: Some(code.into()),
            stock: Some(stock),
        }
    }
}

/// Payload for updating an existing product. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<u32>,
}
