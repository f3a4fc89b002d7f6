use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product as exchanged over HTTP
///
/// Request bodies for create and update use this same shape. On create the
/// `id` is ignored and assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Product {
    /// Server-assigned identifier
    #[serde(default)]
    pub id: i32,

    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Used for exact-match filtering
    #[serde(default)]
    pub category: String,

    /// Serialized as a JSON number
    #[serde(default)]
    pub price: Decimal,
}

/// The fields an update overwrites. The id is never part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
}

impl From<Product> for ProductChanges {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
        }
    }
}

impl Product {
    /// Copy name, description, category and price; keep `id`.
    pub fn apply_changes(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.description = changes.description;
        self.category = changes.category;
        self.price = changes.price;
    }
}

/// Column a listing can be ordered by.
///
/// Keys are matched exactly (`"name"`, `"category"`, `"price"`); anything else
/// means "no ordering".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
    Name,
    Category,
    Price,
}

impl SortField {
    /// `None` for missing or unrecognized keys
    pub fn parse(key: Option<&str>) -> Option<Self> {
        key.and_then(|k| k.parse().ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// Query parameters for `GET /sort`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// `name`, `category` or `price`; other values return the listing unsorted
    #[serde(rename = "sortBy", alias = "sort_by")]
    pub sort_by: Option<String>,

    /// Defaults to descending
    #[serde(default)]
    pub ascending: bool,
}

impl SortQuery {
    pub fn field(&self) -> Option<SortField> {
        SortField::parse(self.sort_by.as_deref())
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_ascending(self.ascending)
    }
}

/// Query parameters for `GET /search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring of the product name; empty matches everything
    #[serde(default)]
    pub name: String,
}

/// Query parameters for `PUT /?id=`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateQuery {
    pub id: Option<i32>,
}
