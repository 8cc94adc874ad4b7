//! Application error type shared by the web and CLI consoles.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::RosterError;
use thiserror::Error;

/// Errors surfaced by console operations.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] RosterError),

    /// The remote directory failed or refused a request.
    #[error("remote directory: {0}")]
    Remote(#[from] roster_client::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A guarded command ran without a stored token.
    #[error("not logged in; run `roster login` first")]
    NotLoggedIn,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(RosterError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(RosterError::Storage(_)) | Self::Io(_) | Self::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Core(_) => StatusCode::BAD_REQUEST,
            Self::Remote(roster_client::Error::Server { status, .. }) if *status < 500 => {
                StatusCode::BAD_REQUEST
            }
            Self::Remote(_) => StatusCode::BAD_GATEWAY,
            Self::NotLoggedIn => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
