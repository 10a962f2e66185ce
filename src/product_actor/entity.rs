//! ActorEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] implementation that enables [`Product`] to be
//! managed by the generic [`ResourceActor`](store_actor::ResourceActor). The availability
//! `code` is the entity's unique key, so the actor itself rejects duplicates.

use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use store_actor::ActorEntity;

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ProductError> {
    let value = value.ok_or(ProductError::MissingField(field))?;
    if value.trim().is_empty() {
        return Err(ProductError::empty(field));
    }
    Ok(value)
}

fn valid_price(price: f64) -> Result<f64, ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::InvalidField {
            field: "price",
            reason: format!("{price} is not a non-negative amount"),
        });
    }
    Ok(price)
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.code)
    }

    /// Builds a Product, requiring every field to be present and non-empty.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let title = required_text("title", params.title)?;
        let description = required_text("description", params.description)?;
        let price = valid_price(params.price.ok_or(ProductError::MissingField("price"))?)?;
        let thumbnail = required_text("thumbnail", params.thumbnail)?;
        let code = required_text("code", params.code)?;
        let stock = params.stock.ok_or(ProductError::MissingField("stock"))?;

        Ok(Self {
            id,
            title,
            description,
            price,
            thumbnail,
            code,
            stock,
        })
    }

    /// Shallow merge: supplied fields replace the stored ones, the rest are kept.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        // Validate everything before touching self, so a rejected update changes nothing.
        let title = update.title.map(|v| required_text("title", Some(v))).transpose()?;
        let description = update
            .description
            .map(|v| required_text("description", Some(v)))
            .transpose()?;
        let price = update.price.map(valid_price).transpose()?;
        let thumbnail = update
            .thumbnail
            .map(|v| required_text("thumbnail", Some(v)))
            .transpose()?;
        let code = update.code.map(|v| required_text("code", Some(v))).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(thumbnail) = thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(code) = code {
            self.code = code;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ProductCreate {
        ProductCreate::new("Mug", "Ceramic mug", 12.5, "mug.png", "MUG-01", 4)
    }

    #[test]
    fn test_every_field_is_required() {
        let mut params = full();
        params.thumbnail = None;
        assert_eq!(
            Product::from_create_params(ProductId(1), params),
            Err(ProductError::MissingField("thumbnail"))
        );

        let mut params = full();
        params.stock = None;
        assert_eq!(
            Product::from_create_params(ProductId(1), params),
            Err(ProductError::MissingField("stock"))
        );
    }

    #[test]
    fn test_blank_text_and_bad_price_are_rejected() {
        let mut params = full();
        params.code = Some("   ".into());
        assert_eq!(
            Product::from_create_params(ProductId(1), params),
            Err(ProductError::empty("code"))
        );

        let mut params = full();
        params.price = Some(-1.0);
        assert!(matches!(
            Product::from_create_params(ProductId(1), params),
            Err(ProductError::InvalidField { field: "price", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_merges_and_rejects_atomically() {
        let mut product = Product::from_create_params(ProductId(1), full()).unwrap();

        product
            .on_update(
                ProductUpdate {
                    price: Some(15.0),
                    ..Default::default()
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(product.price, 15.0);
        assert_eq!(product.title, "Mug");

        let before = product.clone();
        let rejected = product
            .on_update(
                ProductUpdate {
                    title: Some("Big mug".into()),
                    description: Some(String::new()),
                    ..Default::default()
                },
                &(),
            )
            .await;
        assert_eq!(rejected, Err(ProductError::empty("description")));
        assert_eq!(product, before);
    }
}
