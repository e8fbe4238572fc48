use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    MissingTitle,
    TitleConflict(String),
    MissingTitleParam,
    DocumentNotFound(String),
    MalformedDocument(serde_json::Error),
    MalformedBody(serde_json::Error),
    Storage(StoreError),
}

// A read of an absent file is the client's mistake; every other store
// failure is ours.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(title) => Self::DocumentNotFound(title),
            other => Self::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingTitle => (
                StatusCode::BAD_REQUEST,
                "no title found in payload".to_string(),
            ),
            Self::TitleConflict(title) => (
                StatusCode::BAD_REQUEST,
                format!("a document with title \"{}\" already exists", title),
            ),
            Self::MissingTitleParam => {
                (StatusCode::BAD_REQUEST, "no title was provided".to_string())
            }
            Self::DocumentNotFound(title) => (
                StatusCode::BAD_REQUEST,
                format!("no document with title \"{}\" could be found", title),
            ),
            Self::MalformedDocument(err) => {
                tracing::warn!(%err, "stored document failed to parse");
                (
                    StatusCode::BAD_REQUEST,
                    "existing document is incorrectly formatted, unable to read".to_string(),
                )
            }
            Self::MalformedBody(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Storage(err) => {
                tracing::error!(%err, "storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
        .into_response()
    }
}
