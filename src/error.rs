//! Service error taxonomy and its HTTP mapping.
//!
//! Body shape for every failure: `{"error": "<short message>"}`.
//! Internal details are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing / empty / malformed caller input (4xx).
    #[error("{0}")]
    ClientInput(String),

    /// Anything that went wrong on our side (5xx).
    #[error("{public}: {detail}")]
    Internal { public: &'static str, detail: String },
}

impl ServiceError {
    pub fn client(message: impl Into<String>) -> Self {
        Self::ClientInput(message.into())
    }

    pub fn internal(public: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            public,
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ClientInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show the caller.
    pub fn public_message(&self) -> &str {
        match self {
            Self::ClientInput(m) => m,
            Self::Internal { public, .. } => public,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            Self::ClientInput(m) => warn!(target: "api", error = %m, "rejected request"),
            Self::Internal { public, detail } => {
                error!(target: "api", %public, %detail, "request failed")
            }
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_hides_detail_from_caller() {
        let e = ServiceError::internal("Failed to extract UML model", "duplicate class `User`");
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.public_message(), "Failed to extract UML model");
        assert!(e.to_string().contains("duplicate class"));
    }

    #[test]
    fn client_is_bad_request() {
        let e = ServiceError::client("Requirement is required");
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.public_message(), "Requirement is required");
    }
}
