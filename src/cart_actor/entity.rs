//! ActorEntity trait implementation for the Cart domain type.
//!
//! Carts depend on the product store: the actor runs with a
//! [`ProductClient`] as its context, and every hook that introduces a product reference
//! (create, bulk replace, add) checks the product exists first.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::clients::ProductClient;
use crate::model::{Cart, CartCreate, CartId, CartUpdate, LineItem, ProductId};
use async_trait::async_trait;
use std::collections::HashSet;
use store_actor::{ActorClient, ActorEntity};

/// Rejects duplicate products and zero quantities in a line-item payload.
fn validate_line_items(items: &[LineItem]) -> Result<(), CartError> {
    let mut seen = HashSet::new();
    for item in items {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product_id: item.product_id,
                quantity: 0,
            });
        }
        if !seen.insert(item.product_id) {
            return Err(CartError::DuplicateLineItem(item.product_id));
        }
    }
    Ok(())
}

async fn ensure_product_exists(
    products: &ProductClient,
    product_id: ProductId,
) -> Result<(), CartError> {
    match products.get(product_id).await? {
        Some(_) => Ok(()),
        None => Err(CartError::ProductNotFound(product_id)),
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = CartUpdate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ProductClient;
    type Error = CartError;

    fn id(&self) -> &CartId {
        &self.id
    }

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        validate_line_items(&params.products)?;
        Ok(Self {
            id,
            products: params.products,
        })
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), Self::Error> {
        for item in &self.products {
            ensure_product_exists(products, item.product_id).await?;
        }
        Ok(())
    }

    /// Replaces every line item.
    async fn on_update(
        &mut self,
        update: CartUpdate,
        products: &ProductClient,
    ) -> Result<(), Self::Error> {
        validate_line_items(&update.products)?;
        for item in &update.products {
            ensure_product_exists(products, item.product_id).await?;
        }
        self.products = update.products;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        products: &ProductClient,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::AddProduct(product_id) => {
                ensure_product_exists(products, product_id).await?;
                let quantity = match self
                    .products
                    .iter_mut()
                    .find(|item| item.product_id == product_id)
                {
                    Some(item) => {
                        item.quantity = item
                            .quantity
                            .checked_add(1)
                            .ok_or(CartError::QuantityOverflow(product_id))?;
                        item.quantity
                    }
                    None => {
                        self.products.push(LineItem::new(product_id, 1));
                        1
                    }
                };
                Ok(CartActionResult::AddProduct(quantity))
            }
            CartAction::RemoveProduct(product_id) => {
                let before = self.products.len();
                self.products.retain(|item| item.product_id != product_id);
                if self.products.len() == before {
                    return Err(CartError::ProductNotInCart(product_id));
                }
                Ok(CartActionResult::RemoveProduct(()))
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity {
                        product_id,
                        quantity,
                    });
                }
                let item = self
                    .products
                    .iter_mut()
                    .find(|item| item.product_id == product_id)
                    .ok_or(CartError::ProductNotInCart(product_id))?;
                item.quantity = quantity;
                Ok(CartActionResult::SetQuantity(()))
            }
            CartAction::Clear => {
                let removed = self.products.len();
                self.products.clear();
                Ok(CartActionResult::Clear(removed))
            }
        }
    }
}
