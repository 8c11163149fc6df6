use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::response::{ApiResponse, Envelope};

/// Outcome of a failed project or linkage operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// `step` names the store call that failed so multi-step callers can reconcile.
    #[error("{step} failed: {cause:#}")]
    Store {
        step: &'static str,
        cause: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn store(step: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |cause| Self::Store { step, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, detail) = match &self {
            Self::Validation(msg) | Self::NotFound(msg) => (msg.clone(), None),
            Self::Store { step, cause } => {
                error!(%step, error = %format!("{cause:#}"), "store operation failed");
                (format!("Failed to {step}"), Some(self.to_string()))
            }
        };
        ApiResponse::<()> {
            status,
            body: Envelope {
                message,
                data: None,
                error: detail,
            },
        }
        .into_response()
    }
}
