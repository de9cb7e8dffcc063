//! Client-side error taxonomy.
//!
//! Transport and parse failures never escape as panics; everything the
//! session and resource clients can hit is normalized into [`SessionError`].

use reqwest::StatusCode;
use thiserror::Error;

use retailinv_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No token, or the server rejected the one we sent.
    #[error("not authenticated")]
    Unauthenticated,

    /// Login rejected (HTTP 401 from the login endpoint).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Valid session, insufficient role (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Field-level validation failures, either local or reported by the server.
    #[error("validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// Any other non-2xx response.
    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No response was received (connection refused, DNS, timeout).
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// A 2xx response whose body could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client itself could not be set up (TLS backend, local config).
    #[error("client setup failed: {0}")]
    ClientSetup(String),
}

impl SessionError {
    /// Message suitable for showing on the login/registration/CRUD screens.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Unauthenticated => "Your session has expired. Please sign in again.".to_string(),
            SessionError::InvalidCredentials => "Incorrect email or password.".to_string(),
            SessionError::Forbidden => "You do not have permission to perform this action.".to_string(),
            SessionError::ValidationFailed(messages) if messages.is_empty() => {
                "The submitted data is invalid.".to_string()
            }
            SessionError::ValidationFailed(messages) => messages.join("; "),
            SessionError::ServerError { .. } => {
                "The server could not complete the request. Please try again later.".to_string()
            }
            SessionError::Unreachable(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            SessionError::InvalidResponse(_) => "The server sent an unexpected response.".to_string(),
            SessionError::ClientSetup(_) => {
                "The client could not start its network layer. Check the local configuration.".to_string()
            }
        }
    }

    pub(crate) fn server(status: StatusCode, message: impl Into<String>) -> Self {
        SessionError::ServerError {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        SessionError::Unreachable(err.to_string())
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::ValidationFailed(vec![err.detail().to_string()])
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
