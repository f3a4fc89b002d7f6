use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::ProductResult,
    models::{Product, ProductChanges, SortDirection, SortField},
    repository::ProductRepository,
};

/// PostgreSQL repository over a pooled sea-orm connection.
///
/// Each call checks a connection out of the pool for one auto-committed statement.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Name => entity::Column::Name,
        SortField::Category => entity::Column::Category,
        SortField::Price => entity::Column::Price,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Ascending => Order::Asc,
        SortDirection::Descending => Order::Desc,
    }
}

/// Backslash-escape `\\`, `%` and `_` so user text matches literally inside `LIKE`.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn into_products(models: Vec<entity::Model>) -> Vec<Product> {
    models.into_iter().map(Product::from).collect()
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find().all(&self.db).await?;
        Ok(into_products(models))
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        // LIKE '%fragment%' ESCAPE '\': literal, case-sensitive substring
        let pattern = LikeExpr::new(format!("%{}%", escape_like(fragment))).escape('\\');
        let models = entity::Entity::find()
            .filter(entity::Column::Name.like(pattern))
            .all(&self.db)
            .await?;
        Ok(into_products(models))
    }

    async fn filter_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Category.eq(category))
            .all(&self.db)
            .await?;
        Ok(into_products(models))
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn sorted(
        &self,
        field: Option<SortField>,
        direction: SortDirection,
    ) -> ProductResult<Vec<Product>> {
        let mut query = entity::Entity::find();
        if let Some(field) = field {
            query = query.order_by(sort_column(field), sort_order(direction));
        }

        let models = query.all(&self.db).await?;
        Ok(into_products(models))
    }

    async fn create(&self, product: Product) -> ProductResult<Product> {
        let model = entity::new_row(product).insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<bool> {
        let row = entity::ActiveModel {
            id: NotSet,
            name: Set(changes.name),
            description: Set(changes.description),
            category: Set(changes.category),
            price: Set(changes.price),
        };

        let result = entity::Entity::update_many()
            .set(row)
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Updated product");
        }
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let result = entity::Entity::delete_many().exec(&self.db).await?;

        tracing::info!(removed = result.rows_affected, "Deleted all products");
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn row(id: i32, name: &str, cents: i64) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: None,
            category: "Stationery".to_string(),
            price: Decimal::new(cents, 2),
        }
    }

    fn logged_sql(db: DatabaseConnection) -> String {
        format!("{:?}", db.into_transaction_log())
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Pen", 150), row(2, "Pencil", 50)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0], Product::from(row(1, "Pen", 150)));
    }

    #[tokio::test]
    async fn test_sorted_by_price_ascending_orders_in_sql() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(2, "Pencil", 50), row(1, "Pen", 150)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let products = repo
            .sorted(Some(SortField::Price), SortDirection::Ascending)
            .await
            .unwrap();
        assert_eq!(products[0].name, "Pencil");

        let sql = logged_sql(db);
        assert!(sql.contains("ORDER BY"));
        assert!(sql.contains("price"));
        assert!(sql.contains("ASC"));
    }

    #[tokio::test]
    async fn test_sorted_without_field_has_no_order_by() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Pen", 150)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        repo.sorted(None, SortDirection::Descending).await.unwrap();

        assert!(!logged_sql(db).contains("ORDER BY"));
    }

    #[tokio::test]
    async fn test_search_uses_like() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Pen", 150)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let found = repo.search_by_name("Pe").await.unwrap();
        assert_eq!(found.len(), 1);

        let sql = logged_sql(db);
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("%Pe%"));
    }

    #[tokio::test]
    async fn test_search_escapes_like_wildcards() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "A_B", 150)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        repo.search_by_name("_").await.unwrap();

        let sql = logged_sql(db);
        assert!(sql.contains("ESCAPE"));
        // Debug output doubles the backslash of the bound pattern `%\_%`
        assert!(sql.contains(r"%\\_%"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Pen"), "Pen");
        assert_eq!(escape_like("_"), r"\_");
        assert_eq!(escape_like("50%"), r"50\%");
        assert_eq!(escape_like(r"C:\dir"), r"C:\\dir");
        assert_eq!(escape_like(""), "");
    }

    #[tokio::test]
    async fn test_update_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let changed = repo
            .update(77, Product::from(row(77, "Ghost", 1)).into())
            .await
            .unwrap();
        assert!(!changed);

        let sql = logged_sql(db);
        assert!(sql.contains("UPDATE"));
        assert!(sql.contains("WHERE"));
    }

    #[tokio::test]
    async fn test_delete_all_returns_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(repo.delete_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5, "Pen", 150)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut input = Product::from(row(0, "Pen", 150));
        input.id = 123;

        let stored = repo.create(input).await.unwrap();
        assert_eq!(stored.id, 5);
    }

    #[tokio::test]
    async fn test_query_errors_are_surfaced() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, ProductError::Database(_)));
    }
}
