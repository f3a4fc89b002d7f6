//! Query string extractor that answers failures with the error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Drop-in replacement for `axum::extract::Query`.
///
/// A query string that does not deserialize into `T` (for example
/// `?ascending=yes` for a `bool`) is rejected with `400 QUERY_EXTRACTION`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ParsedQuery;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Paging {
///     page: u32,
/// }
///
/// async fn list(ParsedQuery(paging): ParsedQuery<Paging>) -> String {
///     format!("page {}", paging.page)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ParsedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::QueryExtractorRejection(e).into_response())?;

        Ok(ParsedQuery(value))
    }
}
