use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use postcache_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::services::ServiceError;

/// Handler error. Rendered as `{"error": "<message>"}` with a status derived
/// from the underlying service or repository error.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let repo_error = match self.0.downcast_ref::<ServiceError>() {
            Some(ServiceError::Validation(_)) => return StatusCode::BAD_REQUEST,
            Some(ServiceError::Repository(e)) => Some(e),
            None => self.0.downcast_ref::<RepositoryError>(),
        };

        repo_error
            .and_then(|e| StatusCode::from_u16(repository_error_to_status_code(e)).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = %status_code, "Request failed");
        }

        (status_code, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) =
            render(ServiceError::Validation("Invalid post ID: 0".to_string()).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid post ID: 0");
    }

    #[tokio::test]
    async fn test_repository_errors_use_mapping() {
        let (status, _) =
            render(ServiceError::Repository(RepositoryError::not_found("Post", 9)).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = render(
            RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "a@example.com".to_string(),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let (status, body) = render(anyhow::anyhow!("boom").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "boom");
    }
}
