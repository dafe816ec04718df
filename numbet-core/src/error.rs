use thiserror::Error;

pub type Result<T> = std::result::Result<T, NumbetError>;

/// Coarse classification surfaced to callers that only need to know
/// whether to fix input, retry, or report a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    ServerRejected,
    Internal,
}

#[derive(Error, Debug)]
pub enum NumbetError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network connection error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Server rejected request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NumbetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Config(_) => ErrorKind::Validation,
            Self::Network(_) | Self::Timeout(_) => ErrorKind::Network,
            Self::Unauthorized(_) | Self::Server { .. } => ErrorKind::ServerRejected,
            Self::Decode(_)
            | Self::Serialization(_)
            | Self::Io(_)
            | Self::Dialog(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<reqwest::Error> for NumbetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NumbetError::Timeout(err.to_string())
        } else if err.is_decode() {
            NumbetError::Decode(err.to_string())
        } else if err.is_builder() {
            NumbetError::Config(err.to_string())
        } else {
            NumbetError::Network(err.to_string())
        }
    }
}

// conversion from dialoguer::Error
impl From<dialoguer::Error> for NumbetError {
    fn from(err: dialoguer::Error) -> Self {
        NumbetError::Dialog(err.to_string())
    }
}
