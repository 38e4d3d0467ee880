//! Error types for the HTTP wrapper and the session flow.

use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::TransportError;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401. Outside of a login sequence this is the "session expired" signal:
    /// the client has already forced a logout by the time the caller sees it.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    /// 403.
    #[error("forbidden: {message}")]
    Forbidden { message: String },
    #[error("request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build the error for a non-success reply. `message` is the backend's
    /// `message` field when the body carries one, otherwise the raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = backend_message(body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { message },
            StatusCode::FORBIDDEN => Self::Forbidden { message },
            status => Self::Status { status, message },
        }
    }

    /// HTTP status of the reply, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// 401 or 403: the credential was rejected for this resource.
    pub fn is_auth_denied(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Forbidden { .. })
    }
}

fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Failure of a session operation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login reply had no usable `token` field.
    #[error("invalid login response from server: token missing")]
    InvalidResponse,
    /// Both role probes were denied.
    #[error("could not determine the account role")]
    RoleUndetermined,
    /// Both role probes were granted; the backend is not separating roles.
    #[error("account has both donator and beneficiary access")]
    AmbiguousRole,
    /// A role probe failed for a reason other than 401/403.
    #[error("role probe `{endpoint}` failed: {source}")]
    ProbeFailed {
        endpoint: String,
        #[source]
        source: ApiError,
    },
    #[error("registration failed: {0}")]
    RegistrationFailed(#[source] ApiError),
    #[error("a login is already in progress")]
    LoginInProgress,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to persist session: {0}")]
    Storage(#[from] store::StoreError),
    #[error("failed to encode session identity: {0}")]
    Encode(#[source] serde_json::Error),
}
