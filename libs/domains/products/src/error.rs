use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(i32),

    #[error("No products found in category '{0}'")]
    CategoryEmpty(String),

    #[error("Product id in the body ({body}) does not match the requested id ({requested})")]
    IdMismatch { requested: i32, body: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::CategoryEmpty(_) => {
                AppError::NotFound(err.to_string())
            }
            ProductError::IdMismatch { .. } => AppError::BadRequest(err.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(ProductError::NotFound(1).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ProductError::CategoryEmpty("Toys".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProductError::IdMismatch { requested: 1, body: 2 }.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProductError::Database(DbErr::Custom("down".into())).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_mismatch_message_names_both_ids() {
        let msg = ProductError::IdMismatch { requested: 4, body: 3 }.to_string();
        assert!(msg.contains('3') && msg.contains('4'));
    }
}
