//! Events Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type EventsResult<T> = Result<T, EventsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventsError {
    /// Caller broke an operation's contract (e.g. empty host list)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EventsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventsError::InvalidArgument(_) => ErrorKind::BadRequest,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_code("invalid-argument")
    }
}

impl IntoResponse for EventsError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Events request rejected");
        self.to_app_error().into_response()
    }
}
