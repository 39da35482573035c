use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use axum_extra::extract::FormRejection;

use crate::jellyfin::UpstreamError;
use crate::settings::SettingsError;

/// Every handler failure ends up here and leaves as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Unreachable or non-2xx upstream is a gateway problem, not ours.
            ApiError::Upstream(UpstreamError::Transport(_))
            | ApiError::Upstream(UpstreamError::Status { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream(UpstreamError::Decode(_)) | ApiError::Settings(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// Extractor rejections keep the JSON error shape.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        tracing::warn!("{} -> {}", message, status);
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
