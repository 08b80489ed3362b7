use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::agents::InferenceError;

/// Failures of a single review request. Each renders as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("field 'file' is required")]
    MissingFile,

    #[error("invalid upload: {message}")]
    Upload { status: StatusCode, message: String },

    #[error("uploaded file is not valid UTF-8 text: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("failed to encode review payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to store review: {0}")]
    Store(#[from] sqlx::Error),
}

impl ReviewError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            ReviewError::Upload { status, .. } => *status,
            ReviewError::Decode(_)
            | ReviewError::Inference(_)
            | ReviewError::Encode(_)
            | ReviewError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ReviewError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ReviewError::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<axum::extract::multipart::MultipartRejection> for ReviewError {
    fn from(err: axum::extract::multipart::MultipartRejection) -> Self {
        ReviewError::Upload {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Review failed: {}", self);
        } else {
            tracing::warn!("Review rejected: {}", self);
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_server_errors() {
        let err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let review = ReviewError::from(err);
        assert_eq!(review.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(review.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn missing_file_is_unprocessable() {
        assert_eq!(
            ReviewError::MissingFile.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
