// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    pub fn storage(context: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| ApiError::Storage { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidInput(message) => {
                warn!("Rejected request: {message}");
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::NotFound(what) => {
                warn!("{what} not found");
                (StatusCode::NOT_FOUND, json!({ "error": format!("{what} not found") }))
            }
            ApiError::Storage { context, source } => {
                error!("{context}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": context, "details": source.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn response_json(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_input_is_400_with_error_field() {
        let (status, body) =
            response_json(ApiError::InvalidInput("Invalid input".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid input");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = response_json(ApiError::NotFound("Poll")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Poll not found");
    }

    #[tokio::test]
    async fn storage_is_500_with_details() {
        let err = ApiError::Storage {
            context: "Failed to create poll",
            source: sqlx::Error::RowNotFound,
        };
        let (status, body) = response_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create poll");
        assert!(body["details"].as_str().is_some());
    }
}
