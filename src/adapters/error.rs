use tracing::{error, warn};

use crate::application::error::ClientError;

/// Process exit codes for the CLI host.
pub const EXIT_NOT_FOUND: i32 = 3;
pub const EXIT_REJECTED: i32 = 4;
pub const EXIT_TRANSPORT: i32 = 5;
pub const EXIT_CONFIG: i32 = 78;

impl ClientError {
    /// Logs the error at a level matching its severity and returns the short
    /// message shown to the user.
    pub fn report(&self) -> String {
        match self {
            ClientError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                "Not found".to_string()
            }
            ClientError::BackendRejection { status, message } => {
                warn!("Backend rejected request ({}): {}", status, message);
                format!("Request rejected: {}", message)
            }
            ClientError::Transfer { status, message } => {
                error!("Storage rejected transfer ({}): {}", status, message);
                "Upload to storage failed".to_string()
            }
            ClientError::Transport(msg) => {
                error!("Transport error: {}", msg);
                "Could not reach the server".to_string()
            }
            ClientError::LocalFile(msg) => {
                warn!("Local file error: {}", msg);
                format!("Cannot read file: {}", msg)
            }
            ClientError::Config(msg) => {
                error!("Configuration error: {}", msg);
                format!("Configuration error: {}", msg)
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::NotFound(_) => EXIT_NOT_FOUND,
            ClientError::BackendRejection { .. } | ClientError::Transfer { .. } => EXIT_REJECTED,
            ClientError::Transport(_) => EXIT_TRANSPORT,
            ClientError::LocalFile(_) => 1,
            ClientError::Config(_) => EXIT_CONFIG,
        }
    }
}
