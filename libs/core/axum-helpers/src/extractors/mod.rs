//! Custom extractors for Axum handlers.
//!
//! Rejections are rendered through the shared [`ErrorResponse`](crate::errors::ErrorResponse)
//! envelope instead of axum's plain-text bodies.

pub mod id_path;
pub mod parsed_query;
pub mod validated_json;

pub use id_path::IdPath;
pub use parsed_query::ParsedQuery;
pub use validated_json::ValidatedJson;
