use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend rejected the request ({status}): {message}")]
    BackendRejection { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage rejected the transfer ({status}): {message}")]
    Transfer { status: u16, message: String },

    #[error("Cannot read local file: {0}")]
    LocalFile(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
