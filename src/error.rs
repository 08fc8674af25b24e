use serde_json::Value;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
    #[error("Remote request error: {0}")]
    RemoteRequestError(#[from] RemoteError),
}

/// Failure reported by (or on the way to) a vendor platform.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The vendor answered with a non-success status.
    ///
    /// `body` is the decoded JSON error document, or `Value::Null` when the
    /// response carried nothing decodable.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: Value },
    /// The request never produced a response (connect, TLS, timeout, ...).
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl RemoteError {
    /// Per-field validation errors the payments network embeds in rejections.
    pub fn embedded_errors(&self) -> Option<&Value> {
        match self {
            RemoteError::Rejected { body, .. } => body.pointer("/_embedded/errors"),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(Box::new(err))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::RemoteRequestError(err.into())
    }
}

impl GatewayError {
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            GatewayError::RemoteRequestError(remote) => Some(remote),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
