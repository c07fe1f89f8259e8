//! Error types for the Observer API server.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Every response body has the shape `{"error": message, "status": code}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use courtside_core::SessionError;
use courtside_ledger::LedgerError;

/// Errors that can occur in the Observer API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// No game has been started on this server.
    #[error("no game in progress")]
    NoActiveGame,

    /// The game session rejected the request.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The CSV report could not be written.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ObserverError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NoActiveGame => StatusCode::NOT_FOUND,
            Self::Session(SessionError::Ledger(
                LedgerError::Overflow { .. } | LedgerError::InternalError(_),
            ))
            | Self::Serialization(_)
            | Self::Csv(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Session(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "Request rejected: {message}");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
