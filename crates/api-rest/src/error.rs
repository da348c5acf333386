//! API error kinds and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medcalc_core::CoreError;
use medcalc_files::ReportStoreError;

use crate::types::ErrorRes;

/// Every failure a handler can report, one variant per response code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(detail) => tracing::error!("internal error: {}", detail),
            other => tracing::warn!("request rejected ({}): {}", status, other),
        }

        (
            status,
            Json(ErrorRes {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyDataset => ApiError::Validation("No numbers provided".into()),
            e if e.is_validation() => ApiError::Validation(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ReportStoreError> for ApiError {
    fn from(err: ReportStoreError) -> Self {
        match &err {
            ReportStoreError::InvalidFilename(_) => ApiError::Validation(err.to_string()),
            ReportStoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ReportStoreError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn validation_returns_400_with_message() {
        let response = ApiError::Validation("No numbers provided".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No numbers provided");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("File not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "File not found");
    }

    #[tokio::test]
    async fn internal_returns_500_with_error_text() {
        let response = ApiError::Internal("disk full".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "disk full");
    }

    #[test]
    fn core_errors_map_by_kind() {
        assert!(matches!(
            ApiError::from(CoreError::EmptyDataset),
            ApiError::Validation(msg) if msg == "No numbers provided"
        ));
        assert!(matches!(
            ApiError::from(CoreError::MagnitudeTooLarge { value: 11, limit: 10 }),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::EmptyKnowledgeBase),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn store_errors_map_by_kind() {
        assert!(matches!(
            ApiError::from(ReportStoreError::NotFound("a.txt".into())),
            ApiError::NotFound(msg) if msg == "File not found"
        ));
        assert!(matches!(
            ApiError::from(ReportStoreError::InvalidFilename("..".into())),
            ApiError::Validation(_)
        ));
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            ApiError::from(ReportStoreError::Io(io)),
            ApiError::Internal(msg) if msg == "denied"
        ));
    }
}
