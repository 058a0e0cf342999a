//! Error types for jammer-node

use thiserror::Error;

use crate::config::ConfigError;
use crate::node::NodeId;

/// Result type alias for node API operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// Errors produced by a [`NodeService`](crate::NodeService)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The request never produced a response
    #[error("Request failed: {message}")]
    Request { message: String },

    /// The server answered with an error status
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not what we expected
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Endpoint URL could not be built
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Client settings failed validation
    #[error("{0}")]
    Config(String),

    #[error("Timeout")]
    Timeout,

    /// Node not found
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// The service refused the operation
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NodeError::Timeout
        } else if err.is_decode() {
            NodeError::Parse {
                message: err.to_string(),
            }
        } else {
            NodeError::Request {
                message: err.to_string(),
            }
        }
    }
}

impl From<ConfigError> for NodeError {
    fn from(err: ConfigError) -> Self {
        NodeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::Parse {
            message: err.to_string(),
        }
    }
}
