use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// `error` is the short title, `message` the sentence shown to the caller.
    #[error("Not found: {message}")]
    NotFound { error: String, message: String },

    /// `message` is public; `cause` is only ever logged.
    #[error("Database error: {cause}")]
    DatabaseError { message: String, cause: anyhow::Error },

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

/// Body of every non-success response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::NotFound {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        AppError::DatabaseError {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError { .. }
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::database("An error occurred while accessing the database", err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound { error, message } => ErrorResponse { error, message },
            AppError::DatabaseError { message, .. } => ErrorResponse {
                error: "Database error".to_string(),
                message,
            },
            AppError::ServiceUnavailable => ErrorResponse {
                error: "Service unavailable".to_string(),
                message: "The service is temporarily unable to handle the request".to_string(),
            },
            AppError::InternalError(_) => ErrorResponse {
                error: "Internal server error".to_string(),
                message: "An unexpected error occurred".to_string(),
            },
            AppError::ConfigError(_) => ErrorResponse {
                error: "Configuration error".to_string(),
                message: "The service is misconfigured".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_keeps_title_and_message() {
        let (status, body) = body_of(AppError::not_found(
            "Product not found",
            "Product with ID 'P1' does not exist",
        ))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
        assert_eq!(body["message"], "Product with ID 'P1' does not exist");
    }

    #[tokio::test]
    async fn database_error_hides_cause() {
        let err = AppError::database(
            "An error occurred while fetching the product",
            anyhow::anyhow!("connection reset by peer 10.1.2.3:27017"),
        );
        assert!(err.to_string().contains("connection reset"));

        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error");
        assert!(!body.to_string().contains("10.1.2.3"));
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn internal_error_is_generic() {
        let (status, body) = body_of(AppError::from(anyhow::anyhow!("secret detail"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("secret detail"));
    }
}
