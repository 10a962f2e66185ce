use catalog_store::cart_actor::CartError;
use catalog_store::lifecycle::{memory_carts, CatalogSystem};
use catalog_store::model::{CartId, LineItem, Product, ProductCreate, ProductId, ProductUpdate};
use catalog_store::product_actor::ProductError;
use mongodb::bson::oid::ObjectId;
use std::path::Path;
use store_actor::storage::FileStorage;
use store_actor::{ActorClient, ErrorKind};

fn start(path: &Path) -> CatalogSystem {
    CatalogSystem::with_storage(FileStorage::<Product>::new(path), memory_carts(), 16)
}

fn mug(code: &str) -> ProductCreate {
    ProductCreate::new("Mug", "Ceramic mug, 350 ml", 12.5, "img/mug.png", code, 10)
}

fn read_file(path: &Path) -> Vec<Product> {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Full end-to-end integration test with both real actors.
#[tokio::test]
async fn test_full_catalog_integration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let system = start(&path);

    let mug_id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let cup_id = system
        .product_client
        .create_product(ProductCreate::new("Cup", "Espresso cup", 6.0, "cup.png", "CUP-01", 3))
        .await
        .unwrap();
    assert_eq!((mug_id, cup_id), (ProductId(1), ProductId(2)));

    let cart_id = system.cart_client.add_cart().await.unwrap();
    assert_eq!(system.cart_client.add_product(cart_id, mug_id).await.unwrap(), 1);
    assert_eq!(system.cart_client.add_product(cart_id, cup_id).await.unwrap(), 1);
    assert_eq!(system.cart_client.add_product(cart_id, mug_id).await.unwrap(), 2);

    let cart = system.cart_client.get(cart_id).await.unwrap().unwrap();
    assert_eq!(
        cart.products,
        vec![LineItem::new(mug_id, 2), LineItem::new(cup_id, 1)]
    );
    assert_eq!(cart.total_quantity(), 3);

    system.cart_client.set_quantity(cart_id, cup_id, 4).await.unwrap();
    system.cart_client.remove_product(cart_id, mug_id).await.unwrap();

    let populated = system.cart_client.get_populated(cart_id).await.unwrap().unwrap();
    assert_eq!(populated.products.len(), 1);
    assert_eq!(populated.products[0].quantity, 4);
    assert_eq!(
        populated.products[0].product.as_ref().map(|p| p.code.as_str()),
        Some("CUP-01")
    );

    assert_eq!(system.cart_client.clear(cart_id).await.unwrap(), 1);
    assert!(system
        .cart_client
        .get(cart_id)
        .await
        .unwrap()
        .unwrap()
        .products
        .is_empty());

    system.shutdown().await.unwrap();
    assert_eq!(read_file(&path).len(), 2);
}

#[tokio::test]
async fn test_duplicate_code_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let system = start(&path);

    system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = system
        .product_client
        .create_product(mug("MUG-01"))
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::DuplicateCode("MUG-01".into()));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    // Taking another product's code through an update is rejected too.
    let other = system.product_client.create_product(mug("MUG-02")).await.unwrap();
    let err = system
        .product_client
        .update_product(
            other,
            ProductUpdate {
                code: Some("MUG-01".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::DuplicateCode("MUG-01".into()));
}

#[tokio::test]
async fn test_ids_are_max_plus_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");

    // A hand-edited file with a gap and unsorted ids.
    let seeded = serde_json::json!([
        {"id": 7, "title": "A", "description": "a", "price": 1.0, "thumbnail": "a.png", "code": "A", "stock": 1},
        {"id": 3, "title": "B", "description": "b", "price": 2.0, "thumbnail": "b.png", "code": "B", "stock": 2}
    ]);
    std::fs::write(&path, serde_json::to_vec(&seeded).unwrap()).unwrap();

    let system = start(&path);
    let id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    assert_eq!(id, ProductId(8));

    let ids: Vec<_> = read_file(&path).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId(7), ProductId(3), ProductId(8)]);
}

#[tokio::test]
async fn test_exhausted_ids_fail_create_without_stopping_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let seeded = serde_json::json!([
        {"id": u32::MAX, "title": "Z", "description": "z", "price": 1.0, "thumbnail": "z.png", "code": "Z", "stock": 1}
    ]);
    std::fs::write(&path, serde_json::to_vec(&seeded).unwrap()).unwrap();
    let before = std::fs::read(&path).unwrap();

    let system = start(&path);
    let err = system.product_client.create_product(mug("MUG-01")).await.unwrap_err();
    assert!(matches!(err, ProductError::Storage(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let products = system.product_client.list().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId(u32::MAX));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_first_id_in_empty_store_is_one() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("nested").join("products.json"));

    assert!(system.product_client.list().await.unwrap().is_empty());
    let id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    assert_eq!(id, ProductId(1));
}

#[tokio::test]
async fn test_delete_unknown_id_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let system = start(&path);

    system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = system.product_client.delete(ProductId(99)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    assert!(system.product_client.get(ProductId(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_preserves_absent_fields() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("products.json"));

    let id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let original = system.product_client.get(id).await.unwrap().unwrap();

    let updated = system
        .product_client
        .update_product(
            id,
            ProductUpdate {
                price: Some(9.99),
                stock: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 9.99);
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.thumbnail, original.thumbnail);
    assert_eq!(updated.code, original.code);
    assert_eq!(system.product_client.get(id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_missing_field_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("products.json"));

    let mut params = mug("MUG-01");
    params.price = None;
    let err = system.product_client.create_product(params).await.unwrap_err();
    assert_eq!(err, ProductError::MissingField("price"));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(system.product_client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_write_then_read_keeps_order_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");

    let system = start(&path);
    for code in ["C", "A", "B"] {
        system.product_client.create_product(mug(code)).await.unwrap();
    }
    let written = system.product_client.list().await.unwrap();
    system.shutdown().await.unwrap();

    let system = start(&path);
    let read_back = system.product_client.list().await.unwrap();
    assert_eq!(read_back, written);
    assert_eq!(
        read_back.iter().map(|p| p.code.as_str()).collect::<Vec<_>>(),
        vec!["C", "A", "B"]
    );
    assert_eq!(
        system.product_client.list_products(Some(2)).await.unwrap(),
        written[..2].to_vec()
    );
}

#[tokio::test]
async fn test_concurrent_creates_never_lose_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let system = start(&path);

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = system.product_client.clone();
            tokio::spawn(async move { client.create_product(mug(&format!("MUG-{i:02}"))).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let mut ids: Vec<_> = read_file(&path).into_iter().map(|p| p.id.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_concurrent_add_product_counts_every_call() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("products.json"));
    let product_id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let cart_id = system.cart_client.add_cart().await.unwrap();

    let tasks: Vec<_> = (0..15)
        .map(|_| {
            let client = system.cart_client.clone();
            tokio::spawn(async move { client.add_product(cart_id, product_id).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let cart = system.cart_client.get(cart_id).await.unwrap().unwrap();
    assert_eq!(cart.products, vec![LineItem::new(product_id, 15)]);
}

#[tokio::test]
async fn test_add_product_at_max_quantity_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("products.json"));
    let product_id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let cart_id = system.cart_client.add_cart().await.unwrap();

    system.cart_client.add_product(cart_id, product_id).await.unwrap();
    system
        .cart_client
        .set_quantity(cart_id, product_id, u32::MAX)
        .await
        .unwrap();

    let err = system
        .cart_client
        .add_product(cart_id, product_id)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::QuantityOverflow(product_id));
    assert_eq!(err.kind(), ErrorKind::Validation);

    // The cart actor is still serving requests and the cart is unchanged.
    let cart = system.cart_client.get(cart_id).await.unwrap().unwrap();
    assert_eq!(cart.products, vec![LineItem::new(product_id, u32::MAX)]);

    let other = system.product_client.create_product(mug("MUG-02")).await.unwrap();
    system.cart_client.add_product(cart_id, other).await.unwrap();
    let cart = system.cart_client.get(cart_id).await.unwrap().unwrap();
    assert_eq!(cart.total_quantity(), u64::from(u32::MAX) + 1);
    assert_eq!(system.cart_client.clear(cart_id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_cart_references_are_checked() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("products.json"));
    let product_id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let cart_id = system.cart_client.add_cart().await.unwrap();

    let err = system
        .cart_client
        .add_product(cart_id, ProductId(42))
        .await
        .unwrap_err();
    assert_eq!(err, CartError::ProductNotFound(ProductId(42)));

    let err = system
        .cart_client
        .replace_products(
            cart_id,
            vec![LineItem::new(product_id, 1), LineItem::new(product_id, 2)],
        )
        .await
        .unwrap_err();
    assert_eq!(err, CartError::DuplicateLineItem(product_id));

    let replaced = system
        .cart_client
        .replace_products(cart_id, vec![LineItem::new(product_id, 5)])
        .await
        .unwrap();
    assert_eq!(replaced.line_item(product_id).map(|i| i.quantity), Some(5));

    let err = system
        .cart_client
        .set_quantity(cart_id, product_id, 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = system
        .cart_client
        .remove_product(cart_id, ProductId(42))
        .await
        .unwrap_err();
    assert_eq!(err, CartError::ProductNotInCart(ProductId(42)));

    let unknown = CartId(ObjectId::new());
    let err = system.cart_client.add_product(unknown, product_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(system.cart_client.get_populated(unknown).await.unwrap().is_none());
}

#[tokio::test]
async fn test_populated_cart_survives_deleted_product() {
    let dir = tempfile::tempdir().unwrap();
    let system = start(&dir.path().join("products.json"));
    let product_id = system.product_client.create_product(mug("MUG-01")).await.unwrap();
    let cart_id = system.cart_client.add_cart().await.unwrap();
    system.cart_client.add_product(cart_id, product_id).await.unwrap();

    system.product_client.delete(product_id).await.unwrap();

    let populated = system.cart_client.get_populated(cart_id).await.unwrap().unwrap();
    assert_eq!(populated.products.len(), 1);
    assert_eq!(populated.products[0].product_id, product_id);
    assert!(populated.products[0].product.is_none());
}

#[tokio::test]
async fn test_unreadable_product_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, b"[{\"id\": 1,").unwrap();
    let system = start(&path);

    let err = system.product_client.list().await.unwrap_err();
    assert!(matches!(err, ProductError::Storage(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);

    // Cart hooks surface the product store's failure with its kind.
    let cart_id = system.cart_client.add_cart().await.unwrap();
    let err = system
        .cart_client
        .add_product(cart_id, ProductId(1))
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Product(ProductError::Storage(_))));
    assert_eq!(err.kind(), ErrorKind::Storage);
}
