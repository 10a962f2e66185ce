//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the structured logger used by every store actor.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` / `Shutdown`, tagged with `entity_type`
//! - **Requests**: one `debug!` per request with its payload (`?params`, `?update`, `?action`)
//! - **Mutations**: `info!` for `Created`, `Updated`, `Deleted`, `Action ok` with the `id`
//! - **Rejections**: `warn!` for not-found, duplicate keys and validation failures
//! - **Storage failures**: `error!` for I/O, malformed data and database errors
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run                        # mutations only
//! RUST_LOG=debug cargo run                       # full payloads
//! RUST_LOG=store_actor=debug,info cargo run      # framework internals only
//! ```
//!
//! With `RUST_LOG=info` a product create followed by an add-to-cart reads:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! INFO Actor started entity_type="Cart"
//! INFO Created entity_type="Product" id=product_1
//! INFO Created entity_type="Cart" id=cart_66f1c2a9e4b0d1a2b3c4d5e6
//! INFO Action ok entity_type="Cart" id=cart_66f1c2a9e4b0d1a2b3c4d5e6
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once at startup; a second call panics because the global subscriber is already set.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says which store logged
        .compact()
        .init();
}
