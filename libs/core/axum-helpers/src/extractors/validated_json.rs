//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{AppError, ErrorCode, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed bodies and failed `Validate` checks are both answered with the
/// shared error envelope; validation failures list every offending field in `details`.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateItem {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn create_item(ValidatedJson(payload): ValidatedJson<CreateItem>) -> String {
///     format!("Creating item: {}", payload.name)
/// }
///
/// let app = Router::new().route("/items", post(create_item));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::JsonExtractorRejection(e).into_response())?;

        data.validate().map_err(|e| {
            let details = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_messages: Vec<serde_json::Value> = errors
                        .iter()
                        .map(|err| {
                            serde_json::json!({
                                "code": err.code,
                                "message": err.message,
                                "params": err.params,
                            })
                        })
                        .collect();
                    (field.to_string(), serde_json::json!(error_messages))
                })
                .collect::<serde_json::Map<_, _>>();

            tracing::info!(
                error_code = ErrorCode::ValidationError.code(),
                fields = details.len(),
                "Request body failed validation"
            );

            let mut error_response = ErrorResponse::new(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
            );
            error_response.details = Some(serde_json::Value::Object(details));

            (StatusCode::BAD_REQUEST, axum::Json(error_response)).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
