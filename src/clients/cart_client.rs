//! # Cart Client
//!
//! Provides a high‑level API for interacting with the `Cart` actor.
//! It wraps a `ResourceClient<Cart>` and a [`ProductClient`] for population.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::ProductClient;
use crate::model::{
    Cart, CartCreate, CartId, CartUpdate, LineItem, PopulatedCart, PopulatedLineItem, ProductId,
};
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// `get`, `list` and `delete` come from [`ActorClient`].
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    products: ProductClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, products: ProductClient) -> Self {
        Self { inner, products }
    }

    /// Parse a cart id from its hex form, as found in a request path.
    pub fn parse_id(raw: &str) -> Result<CartId, CartError> {
        raw.parse::<CartId>()
            .map_err(|_| CartError::InvalidId(raw.to_string()))
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::from(e)
    }
}

impl CartClient {
    /// Create a cart, optionally with initial line items.
    #[instrument(skip(self))]
    pub async fn create_cart(&self, params: CartCreate) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(CartError::from)
    }

    /// Create an empty cart.
    pub async fn add_cart(&self) -> Result<CartId, CartError> {
        self.create_cart(CartCreate::default()).await
    }

    /// The cart with each line item's product looked up in the catalog.
    ///
    /// `Ok(None)` if the cart does not exist. A line item whose product has since been
    /// deleted is kept, with `product: None`.
    #[instrument(skip(self))]
    pub async fn get_populated(&self, id: CartId) -> Result<Option<PopulatedCart>, CartError> {
        let Some(cart) = self.get(id).await? else {
            return Ok(None);
        };

        let mut products = Vec::with_capacity(cart.products.len());
        for item in cart.products {
            let product = self.products.get(item.product_id).await?;
            products.push(PopulatedLineItem {
                product_id: item.product_id,
                product,
                quantity: item.quantity,
            });
        }
        debug!(lines = products.len(), "Cart populated");

        Ok(Some(PopulatedCart {
            id: cart.id,
            products,
        }))
    }

    /// Add one unit of a product. Returns the line item's new quantity.
    #[instrument(skip(self))]
    pub async fn add_product(&self, id: CartId, product_id: ProductId) -> Result<u32, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::AddProduct(product_id))
            .await
        {
            Ok(CartActionResult::AddProduct(quantity)) => Ok(quantity),
            Ok(_) => unreachable!("AddProduct action must return AddProduct result"),
            Err(e) => Err(CartError::from(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: CartId, product_id: ProductId) -> Result<(), CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::RemoveProduct(product_id))
            .await
        {
            Ok(CartActionResult::RemoveProduct(())) => Ok(()),
            Ok(_) => unreachable!("RemoveProduct action must return RemoveProduct result"),
            Err(e) => Err(CartError::from(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(
                id,
                CartAction::SetQuantity {
                    product_id,
                    quantity,
                },
            )
            .await
        {
            Ok(CartActionResult::SetQuantity(())) => Ok(()),
            Ok(_) => unreachable!("SetQuantity action must return SetQuantity result"),
            Err(e) => Err(CartError::from(e)),
        }
    }

    /// Replace every line item of the cart. Returns the updated cart.
    #[instrument(skip(self))]
    pub async fn replace_products(
        &self,
        id: CartId,
        products: Vec<LineItem>,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .update(id, CartUpdate { products })
            .await
            .map_err(CartError::from)
    }

    /// Remove every line item. Returns how many there were.
    #[instrument(skip(self))]
    pub async fn clear(&self, id: CartId) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CartAction::Clear).await {
            Ok(CartActionResult::Clear(removed)) => Ok(removed),
            Ok(_) => unreachable!("Clear action must return Clear result"),
            Err(e) => Err(CartError::from(e)),
        }
    }
}
