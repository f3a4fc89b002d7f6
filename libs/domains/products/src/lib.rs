//! Products Domain
//!
//! Catalogue of products backed by a single relational table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← One repository call per operation, degrades failures to defaults
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access with explicit errors (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← Persisted row and its mapping to the wire model
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let service = ProductService::new(repository);
//!
//! // Mount under /api/products
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use models::{
    Product, ProductChanges, SearchQuery, SortDirection, SortField, SortQuery, UpdateQuery,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
