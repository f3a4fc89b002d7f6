use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Product;

/// Persisted row of the `products` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// OpenAPI tag shared by every product route
    pub const TAG: &'static str = "products";
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            price: model.price,
        }
    }
}

impl From<Product> for Model {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
        }
    }
}

/// Insert model: the id is left for the sequence to assign.
pub fn new_row(product: Product) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(product.name),
        description: Set(product.description),
        category: Set(product.category),
        price: Set(product.price),
    }
}
