//! Error types for the noughts game client

use thiserror::Error;

use crate::types::{Address, Digest};

/// Main error type for the game client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("object {id} not found")]
    NotFound { id: Address },

    #[error("object {id} is not a game: {message}")]
    WrongType { id: Address, message: String },

    #[error("network error: {source}")]
    Network { source: RpcError, context: String },

    #[error("unsupported operation: {message}")]
    UnsupportedOperation { message: String },

    #[error("transaction {digest} failed: {message}")]
    Execution { digest: Digest, message: String },

    #[error("invalid address: {message}")]
    InvalidAddress { message: String },

    #[error("invalid move: {message}")]
    InvalidMove { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String, field: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// Transport-level error types for the JSON-RPC client.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("request timeout: {duration_ms}ms")]
    RequestTimeout { duration_ms: u64 },

    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("server error {code}: {message}")]
    ServerError { code: i64, message: String },
}

impl From<RpcError> for ClientError {
    fn from(err: RpcError) -> Self {
        ClientError::Network {
            source: err,
            context: String::new(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization {
            message: err.to_string(),
        }
    }
}

impl ClientError {
    /// Attach request context to a network error; other variants pass through.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            ClientError::Network { source, .. } => ClientError::Network {
                source,
                context: context.to_string(),
            },
            other => other,
        }
    }
}

/// Type alias for the main result type used throughout the library.
pub type ClientResult<T> = Result<T, ClientError>;
