use crate::domain::model::StudyResponse;
use crate::utils::error::{AppError, ErrorCategory};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Network | ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            tracing::debug!("Rejected request: {}", self);
        } else {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        }

        (status, Json(StudyResponse::Error(self.to_string()))).into_response()
    }
}

impl IntoResponse for StudyResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
