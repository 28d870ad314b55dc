//! Error types for the file cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Fetch Error Enum ==
/// Errors produced by the fetch collaborator.
///
/// The cache layer never adds variants of its own; whatever the fetcher
/// reports is what the caller receives.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No file exists at the requested path
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested path is a directory
    #[error("Is a directory: {0}")]
    IsDirectory(String),

    /// Any other read failure
    #[error("Read failed: {0}")]
    Other(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let status = match &self {
            FetchError::NotFound(_) => StatusCode::NOT_FOUND,
            FetchError::IsDirectory(_) => StatusCode::NOT_FOUND,
            FetchError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (FetchError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (FetchError::IsDirectory("b".into()), StatusCode::NOT_FOUND),
            (
                FetchError::Other("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::NotFound("missing.txt".into());
        assert_eq!(err.to_string(), "Not found: missing.txt");
    }
}
