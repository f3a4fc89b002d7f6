//! Database library providing PostgreSQL connection management for the services.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use database::common::RetryConfig;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, Some(RetryConfig::new())).await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::DatabaseError;
