use crate::clients::{CartClient, ProductClient};
use crate::lifecycle::config::{CartBackend, ConfigError, StoreConfig};
use crate::model::{Cart, CartId, Product};
use crate::{cart_actor, product_actor};
use store_actor::storage::{
    DocumentId, FileStorage, MemoryStorage, MongoStorage, Storage, StorageError,
};
use thiserror::Error;
use tracing::{error, info};

/// Errors starting or stopping a [`CatalogSystem`].
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to open store: {0}")]
    Storage(#[from] StorageError),
    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// The runtime orchestrator for the catalog: the product store and the cart store.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping both actors
/// - **Dependency Wiring**: the cart actor runs with a `ProductClient` as its context
/// - **Storage Selection**: product file and cart backend come from [`StoreConfig`]
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::from_config(&StoreConfig::load("catalog.toml")?).await?;
///
/// let product_id = system.product_client.create_product(params).await?;
/// let cart_id = system.cart_client.add_cart().await?;
/// system.cart_client.add_product(cart_id, product_id).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Opens the stores named by `config` and starts both actors.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, SystemError> {
        let products = FileStorage::<Product>::new(&config.products.path);
        let capacity = config.channel_capacity;

        let system = match config.carts.backend {
            CartBackend::Mongodb => {
                let carts = MongoStorage::<Cart>::connect(
                    &config.carts.uri,
                    &config.carts.database,
                    &config.carts.collection,
                )
                .await?;
                Self::with_storage(products, carts, capacity)
            }
            CartBackend::Memory => Self::with_storage(products, memory_carts(), capacity),
        };
        Ok(system)
    }

    /// Starts both actors over the given backends.
    ///
    /// 1. Creates the product actor (no dependencies)
    /// 2. Creates the cart actor, whose client keeps a product client for population
    /// 3. Spawns each actor in its own Tokio task, injecting the product client into the
    ///    cart actor's context
    pub fn with_storage(
        products: impl Storage<Product> + 'static,
        carts: impl Storage<Cart> + 'static,
        capacity: usize,
    ) -> Self {
        // 1. Create actors (no dependencies)
        let (product_actor, product_client) = product_actor::new(capacity, products);
        let (cart_actor, cart_client) = cart_actor::new(capacity, carts, product_client.clone());

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(product_client.clone()));

        Self {
            product_client,
            cart_client,
            handles: vec![cart_handle, product_handle],
        }
    }

    /// Gracefully shuts down the catalog.
    ///
    /// Dropping the clients closes the channels; each actor finishes the requests already
    /// queued and exits. The cart actor goes first, which releases the product client it
    /// holds as context and lets the product actor stop.
    ///
    /// Clones of the clients held elsewhere keep their actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down catalog...");

        drop(self.cart_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorFailed(e.to_string()));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}

/// In-memory carts with database-style ids.
pub fn memory_carts() -> MemoryStorage<Cart> {
    MemoryStorage::new(<CartId as DocumentId>::generate)
}
