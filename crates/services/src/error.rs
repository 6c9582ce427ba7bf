//! Shared error types for the services crate.

use cache::CacheError;
use thiserror::Error;

/// Shown for HTTP 401.
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required. Please sign in to continue.";
/// Shown for HTTP 403.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource.";
/// Shown for HTTP 404.
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
/// Shown for HTTP 500.
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong on our end. Please try again later.";
/// Shown for any other status when the body carries no message.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";
/// Shown when the request never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

/// Failures below the HTTP layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Errors surfaced to widgets. `Display` is the user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,
    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden,
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("{}", SERVER_ERROR_MESSAGE)]
    Server,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Transport { detail: String },
    #[error("The server sent an unexpected response.")]
    Decode { detail: String },
    #[error("Local cache is unavailable.")]
    Cache { detail: String },
}

impl ApiError {
    /// HTTP status that produced this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Server => Some(500),
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } | Self::Cache { .. } => None,
        }
    }

    /// True for failures where no response was received at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Transport {
            detail: err.to_string(),
        }
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        Self::Cache {
            detail: err.to_string(),
        }
    }
}

/// Errors emitted by `ChatService::send_message`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChatError {
    #[error("A message is already being sent. Please wait for the reply.")]
    InFlight,
    #[error("You have used all {limit} prompts for this period.")]
    LimitReached { limit: u32 },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while loading `ApiConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base url {raw:?}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
