//! Error types for the listings service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pxn_types::CommandError;
use thiserror::Error;

use crate::response::ErrorResponse;

/// Service error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or startup error.
    #[error("config error: {0}")]
    Config(String),
    /// Request body exceeded `max_body_bytes`; never decoded.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
    /// A listing command was rejected.
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Command(err) => match err {
                CommandError::MalformedCommand(_)
                | CommandError::InvalidSignature(_)
                | CommandError::Unauthorized(_) => StatusCode::BAD_REQUEST,
                CommandError::NotFound(_) => StatusCode::NOT_FOUND,
                CommandError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxn_types::DenyReason;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CommandError::malformed("x"), StatusCode::BAD_REQUEST),
            (CommandError::invalid_signature("x"), StatusCode::BAD_REQUEST),
            (
                CommandError::Unauthorized(DenyReason::OwnerUnknown),
                StatusCode::BAD_REQUEST,
            ),
            (CommandError::not_found("l-1"), StatusCode::NOT_FOUND),
            (
                CommandError::StoreUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(Error::from(err).status(), status);
        }
        assert_eq!(
            Error::Config("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::PayloadTooLarge { limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
