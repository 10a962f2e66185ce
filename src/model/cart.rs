use crate::model::{Product, ProductId};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use store_actor::storage::DocumentId;

/// Type-safe identifier for Carts: the document's `_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub ObjectId);

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0.to_hex())
    }
}

/// Parses the 24-character hex form used in request paths.
impl FromStr for CartId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

impl DocumentId for CartId {
    fn generate() -> Self {
        Self(ObjectId::new())
    }

    fn to_bson(&self) -> Bson {
        Bson::ObjectId(self.0)
    }
}

/// One product in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Represents a shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](store_actor::ActorEntity) trait and is kept in
/// a [`MongoStorage`](store_actor::storage::MongoStorage), one document per cart.
///
/// Line items are unique per product and their quantity is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: CartId,
    #[serde(default)]
    pub products: Vec<LineItem>,
}

impl Cart {
    /// The line item for `product_id`, if the cart holds it.
    pub fn line_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.products.iter().find(|item| item.product_id == product_id)
    }

    /// Total number of units across all line items.
    pub fn total_quantity(&self) -> u64 {
        self.products.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Payload for creating a new cart. Usually empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartCreate {
    #[serde(default)]
    pub products: Vec<LineItem>,
}

/// Payload replacing every line item of a cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartUpdate {
    pub products: Vec<LineItem>,
}

/// A cart with each line item's product resolved through the product store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedCart {
    pub id: CartId,
    pub products: Vec<PopulatedLineItem>,
}

/// A line item with its product. `product` is `None` when the referenced product no
/// longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedLineItem {
    pub product_id: ProductId,
    pub product: Option<Product>,
    pub quantity: u32,
}
