//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers (plus HSTS when served over TLS)
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_permissive_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_permissive_cors_layer());
//! ```

pub mod cors;
pub mod security;

pub use cors::create_permissive_cors_layer;
pub use security::{security_headers, strict_transport_security};
