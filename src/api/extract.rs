//! JSON extractor whose rejections use the gateway's error body

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::AppError;

/// Like [`axum::Json`], but malformed bodies answer 400 `{"error": ...}`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
