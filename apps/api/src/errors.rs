use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::packing::PackingError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("quantity {quantity} exceeds the maximum of {max}")]
    QuantityTooLarge { quantity: i64, max: i64 },

    #[error("optimization error: {0}")]
    Packing(#[from] PackingError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::QuantityTooLarge { .. } => (StatusCode::BAD_REQUEST, "QUANTITY_TOO_LARGE"),
            AppError::Packing(PackingError::InvalidQuantity(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_QUANTITY")
            }
            AppError::Packing(e) => {
                tracing::error!("Packing error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "OPTIMIZATION_ERROR")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("missing 'qty' parameter".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_quantity_is_bad_request() {
        let response = AppError::from(PackingError::InvalidQuantity(-1)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_infeasible_plan_is_server_error() {
        let response =
            AppError::from(PackingError::NoFeasiblePlan { quantity: 7 }).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_quantity_too_large_message() {
        let err = AppError::QuantityTooLarge {
            quantity: 5_000_000,
            max: 1_000_000,
        };
        assert_eq!(
            err.to_string(),
            "quantity 5000000 exceeds the maximum of 1000000"
        );
    }
}
