use crate::repositories::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures surfaced by the HTTP layer.
///
/// | Variant       | Status | Body                       |
/// |---------------|--------|----------------------------|
/// | InvalidJson   | 400    | `Invalid JSON`             |
/// | InvalidUserId | 400    | `Invalid user ID`          |
/// | UserNotFound  | 404    | `User not found`           |
/// | Repository    | 500    | per-operation message      |
///
/// Bodies are plain text. Store errors are logged, never echoed.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid user ID")]
    InvalidUserId(String),

    #[error("User not found")]
    UserNotFound,

    #[error("{message}")]
    Repository {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl AppError {
    /// Build a mapper for repository failures; `NotFound` becomes a 404,
    /// everything else a 500 carrying `message`.
    pub fn repository(message: &'static str) -> impl FnOnce(RepositoryError) -> AppError {
        move |source| match source {
            RepositoryError::NotFound => AppError::UserNotFound,
            source => AppError::Repository { message, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) | AppError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Repository { message, source } => {
                tracing::error!("{}: {}", message, source);
            }
            AppError::InvalidJson(e) => tracing::debug!("Rejected request body: {}", e),
            AppError::InvalidUserId(raw) => tracing::debug!("Rejected user id {:?}", raw),
            AppError::UserNotFound => {}
        }

        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let response = AppError::InvalidJson(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid JSON");
    }

    #[tokio::test]
    async fn test_invalid_user_id_is_bad_request() {
        let response = AppError::InvalidUserId("abc".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid user ID");
    }

    #[tokio::test]
    async fn test_repository_not_found_maps_to_404() {
        let err = AppError::repository("Failed to get user")(RepositoryError::NotFound);
        assert!(matches!(err, AppError::UserNotFound));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "User not found");
    }

    #[tokio::test]
    async fn test_database_error_is_generic_500() {
        let err = AppError::repository("Failed to update user")(RepositoryError::Database(
            sqlx::Error::PoolTimedOut,
        ));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        // Driver detail stays in the logs
        assert_eq!(body_text(response).await, "Failed to update user");
    }
}
