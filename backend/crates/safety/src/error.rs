//! Safety Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::docstore::DocStoreError;
use thiserror::Error;

pub type SafetyResult<T> = Result<T, SafetyError>;

#[derive(Debug, Error)]
pub enum SafetyError {
    /// No record with that ID (or the ID is not a UUID)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Submitted fields rejected
    #[error("{0}")]
    Validation(String),

    /// Document store unavailable or query failed
    #[error("Store error: {0}")]
    Store(#[from] DocStoreError),
}

impl SafetyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SafetyError::NotFound(_) => StatusCode::NOT_FOUND,
            SafetyError::Validation(_) => StatusCode::BAD_REQUEST,
            SafetyError::Store(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            SafetyError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SafetyError::NotFound(_) => ErrorKind::NotFound,
            SafetyError::Validation(_) => ErrorKind::BadRequest,
            SafetyError::Store(e) if e.is_unavailable() => ErrorKind::ServiceUnavailable,
            SafetyError::Store(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            SafetyError::Store(_) => AppError::new(self.kind(), "Something went wrong on our side")
                .with_action("Please try again later"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            SafetyError::Store(e) => tracing::error!(error = %e, "Safety store error"),
            _ => tracing::debug!(error = %self, "Safety request rejected"),
        }
    }
}

impl IntoResponse for SafetyError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
