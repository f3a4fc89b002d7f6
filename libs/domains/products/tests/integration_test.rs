//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The entity matches the migrated table
//! - Filtering and ordering happen in SQL
//! - Updates and deletes touch only the addressed rows
//!
//! Run with `cargo test -p domain_products -- --ignored` on a host with Docker.

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn product(name: String, category: String, price: Decimal) -> Product {
    Product {
        id: 0,
        name,
        description: None,
        category,
        price,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = Product {
        description: Some("Integration test product".to_string()),
        ..product(
            builder.name("product", "main"),
            builder.category("main"),
            builder.price(),
        )
    };

    let created = repo.create(input.clone()).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, input.name);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_eq!(retrieved.id, created.id);
    assert_eq!(retrieved.description, input.description);
    assert_decimal_eq(retrieved.price, input.price, "stored price");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_category_and_sort() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    repo.create(product("Pen".into(), "Stationery".into(), Decimal::new(150, 2)))
        .await
        .unwrap();
    repo.create(product("Pencil".into(), "Stationery".into(), Decimal::new(50, 2)))
        .await
        .unwrap();
    repo.create(product("Kettle".into(), "Kitchen".into(), Decimal::new(2499, 2)))
        .await
        .unwrap();

    let found = repo.search_by_name("Pen").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(repo.search_by_name("pen").await.unwrap().is_empty());

    assert_eq!(repo.filter_by_category("Stationery").await.unwrap().len(), 2);
    assert!(repo.filter_by_category("Garden").await.unwrap().is_empty());

    let ascending = repo
        .sorted(Some(SortField::Price), SortDirection::Ascending)
        .await
        .unwrap();
    let names: Vec<&str> = ascending.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Pencil", "Pen", "Kettle"]);

    let by_name_desc = repo
        .sorted(Some(SortField::Name), SortDirection::Descending)
        .await
        .unwrap();
    assert_eq!(by_name_desc[0].name, "Pencil");

    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_treats_wildcards_literally() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    repo.create(product("A_B".into(), "Misc".into(), Decimal::ONE))
        .await
        .unwrap();
    repo.create(product("AB".into(), "Misc".into(), Decimal::ONE))
        .await
        .unwrap();

    let found = repo.search_by_name("_").await.unwrap();
    let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A_B"]);

    assert!(repo.search_by_name("%").await.unwrap().is_empty());
    assert!(repo.search_by_name(r"\").await.unwrap().is_empty());
    assert_eq!(repo.search_by_name("").await.unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_and_delete");

    let created = repo
        .create(product(
            builder.name("product", "before"),
            builder.category("before"),
            Decimal::ONE,
        ))
        .await
        .unwrap();
    let untouched = repo
        .create(product(
            builder.name("product", "other"),
            builder.category("other"),
            Decimal::TWO,
        ))
        .await
        .unwrap();

    let changes = ProductChanges {
        name: builder.name("product", "after"),
        description: Some("updated".to_string()),
        category: builder.category("after"),
        price: Decimal::new(999, 2),
    };
    assert!(repo.update(created.id, changes.clone()).await.unwrap());
    assert!(!repo.update(created.id + 1000, changes).await.unwrap());

    let updated = assert_some(repo.get_by_id(created.id).await.unwrap(), "updated row");
    assert_eq!(updated.name, builder.name("product", "after"));
    assert_eq!(updated.description.as_deref(), Some("updated"));
    assert_decimal_eq(updated.price, Decimal::new(999, 2), "updated price");

    let other = assert_some(repo.get_by_id(untouched.id).await.unwrap(), "other row");
    assert_eq!(other, untouched);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);

    assert_eq!(repo.delete_all().await.unwrap(), 1);
    assert_eq!(repo.count().await.unwrap(), 0);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_stationery_scenario() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    service
        .add_product(product("Pen".into(), "Stationery".into(), Decimal::new(150, 2)))
        .await;
    service
        .add_product(product("Pencil".into(), "Stationery".into(), Decimal::new(50, 2)))
        .await;

    let sorted = service
        .sorted_products(Some(SortField::Price), SortDirection::Ascending)
        .await;
    assert_eq!(sorted[0].name, "Pencil");
    assert_eq!(service.products_by_category("Stationery").await.len(), 2);
    assert_eq!(service.total_count().await, 2);

    service.delete_all_products().await;
    assert_eq!(service.total_count().await, 0);
}
