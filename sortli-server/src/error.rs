//! Mapping of classification failures onto HTTP responses.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sortli_core::{ClassifyError, ErrorKind};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Failure of an HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be read, e.g. because it exceeds the size limit.
    UnreadableBody(BytesRejection),
    /// The body could not be decoded.
    MalformedBody(String),
    /// The classification itself failed.
    Classify(ClassifyError),
}

impl ApiError {
    /// Status code sent for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnreadableBody(rejection) => rejection.status(),
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Classify(err) => match err.kind() {
                ErrorKind::Request => StatusCode::BAD_REQUEST,
                ErrorKind::Configuration | ErrorKind::Upstream => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::UnreadableBody(rejection) => rejection.body_text(),
            Self::MalformedBody(reason) => format!("Invalid request body: {reason}"),
            Self::Classify(err) => err.to_string(),
        }
    }
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        Self::Classify(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
