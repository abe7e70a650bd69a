use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// SessionError
///
/// Why a stored session value could not be turned into a `SessionRecord`.
/// Never leaves the session boundary: callers only ever see `Option<SessionRecord>`.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("session record has an empty uid")]
    MissingUid,
}

/// NavigationError
///
/// Failures of a full navigation (static redirects plus guard redirects).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect limit of {limit} exceeded while navigating to {path}")]
    RedirectLoop { path: String, limit: usize },
}

/// AppError
///
/// Error type returned by the JSON handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Navigation(NavigationError::RedirectLoop { .. }) => StatusCode::LOOP_DETECTED,
        };

        (status, self.to_string()).into_response()
    }
}
