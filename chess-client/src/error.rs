//! Error types for the chess client

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(#[from] std::io::Error),

    #[error("Connection to the authority is closed")]
    Disconnected,

    #[error("Failed to encode or decode message: {0}")]
    Codec(#[from] serde_json::Error),
}
