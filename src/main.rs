//! # Catalog Demo
//!
//! Runs both stores end to end:
//! 1.  Loads a [`StoreConfig`] (from the TOML file given as first argument, or defaults plus
//!     environment overrides).
//! 2.  Starts the [`CatalogSystem`].
//! 3.  Adds a product, fills a cart with it and prints the populated cart.
//!
//! ```bash
//! RUST_LOG=info cargo run --bin catalog-demo -- catalog.toml
//! ```

use catalog_store::lifecycle::{CatalogSystem, StoreConfig};
use catalog_store::model::{ProductCreate, ProductUpdate};
use catalog_store::product_actor::ProductError;
use store_actor::tracing::setup_tracing;
use store_actor::ActorClient;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::from_env()?,
    };
    let system = CatalogSystem::from_config(&config).await?;

    // Codes are unique across runs sharing the same product file
    let existing = system.product_client.list().await?.len();
    let code = format!("DEMO-{}", existing + 1);

    let span = tracing::info_span!("product_setup");
    let product_id = async {
        let params = ProductCreate::new(
            "Espresso cup",
            "Double-walled glass, 80 ml",
            14.90,
            "img/espresso-cup.png",
            code.clone(),
            25,
        );
        system.product_client.create_product(params).await
    }
    .instrument(span)
    .await?;
    info!(%product_id, %code, "Product created");

    // A second product with the same code is rejected
    let duplicate = ProductCreate::new("Copy", "Same code", 1.0, "x.png", code.clone(), 1);
    match system.product_client.create_product(duplicate).await {
        Err(ProductError::DuplicateCode(code)) => info!(%code, "Duplicate code rejected"),
        other => warn!(?other, "Duplicate code was not rejected"),
    }

    let updated = system
        .product_client
        .update_product(
            product_id,
            ProductUpdate {
                stock: Some(24),
                ..Default::default()
            },
        )
        .await?;
    info!(%product_id, stock = updated.stock, price = updated.price, "Product updated");

    let span = tracing::info_span!("cart_flow");
    let cart = async {
        let cart_id = system.cart_client.add_cart().await?;
        system.cart_client.add_product(cart_id, product_id).await?;
        let quantity = system.cart_client.add_product(cart_id, product_id).await?;
        info!(%cart_id, quantity, "Product added twice");

        system.cart_client.set_quantity(cart_id, product_id, 3).await?;
        system.cart_client.get_populated(cart_id).await
    }
    .instrument(span)
    .await?;

    if let Some(cart) = cart {
        info!(cart = %serde_json::to_string(&cart)?, "Populated cart");
        system.cart_client.clear(cart.id).await?;
    }

    let catalog = system.product_client.list_products(Some(5)).await?;
    info!(shown = catalog.len(), "First products in the catalog");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
