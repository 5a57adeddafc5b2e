use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use blob_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing image data or filename.";
pub const INVALID_BASE64_MESSAGE: &str = "Image data is not valid base64.";

#[derive(Debug, Error)]
pub enum HandlerError {
    /// The caller has to fix the request.
    #[error("{0}")]
    InvalidArgument(String),

    /// The store rejected the write; the caller may retry.
    #[error("{0}")]
    Internal(#[from] StoreError),
}

impl HandlerError {
    pub fn missing_fields() -> Self {
        HandlerError::InvalidArgument(MISSING_FIELDS_MESSAGE.to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::InvalidArgument(_) => "invalid-argument",
            HandlerError::Internal(_) => "internal",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            HandlerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorBody {
            error: ErrorDetail { code: self.code(), message: self.to_string() },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
