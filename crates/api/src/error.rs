use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use extract::RecognizerError;
use ingest::DecodeError;
use store::StoreError;

/// Failures surfaced at the HTTP boundary. Every variant carries a stable
/// machine-readable kind alongside the human message; none of them is ever
/// downgraded to an empty success.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("at most {max} files can be uploaded at once, got {count}")]
    UploadLimitExceeded { count: usize, max: usize },
    #[error("unsupported file type: .{extension}")]
    UnsupportedFileType { extension: String },
    #[error("uploaded file is not valid UTF-8")]
    InvalidEncoding,
    #[error("document {0} not found")]
    DocumentNotFound(Uuid),
    #[error("no documents stored")]
    NoDocuments,
    #[error("entity recognizer unavailable: {0}")]
    RecognizerUnavailable(String),
    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("processing timed out")]
    Timeout,
    #[error("malformed upload: {0}")]
    BadUpload(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UploadLimitExceeded { .. } => "upload_limit_exceeded",
            Self::UnsupportedFileType { .. } => "unsupported_file_type",
            Self::InvalidEncoding => "invalid_encoding",
            Self::DocumentNotFound(_) | Self::NoDocuments => "document_not_found",
            Self::RecognizerUnavailable(_) => "recognizer_unavailable",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Timeout => "timeout",
            Self::BadUpload(_) => "bad_upload",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UploadLimitExceeded { .. }
            | Self::UnsupportedFileType { .. }
            | Self::InvalidEncoding
            | Self::BadUpload(_) => StatusCode::BAD_REQUEST,
            Self::DocumentNotFound(_) | Self::NoDocuments => StatusCode::NOT_FOUND,
            Self::RecognizerUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedFileType { extension } => {
                Self::UnsupportedFileType { extension }
            }
            DecodeError::InvalidUtf8(_) => Self::InvalidEncoding,
        }
    }
}

impl From<RecognizerError> for ApiError {
    fn from(err: RecognizerError) -> Self {
        Self::RecognizerUnavailable(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DocumentNotFound(id) => Self::DocumentNotFound(id),
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}
