use reqwest::{Response, StatusCode};

use crate::application::{dto::files_dto::ErrorBody, error::ClientError};

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::Transport("Request timeout".to_string())
        } else if error.is_connect() {
            ClientError::Transport(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            ClientError::Transport(format!("Malformed response body: {}", error))
        } else if let Some(status) = error.status() {
            match status {
                StatusCode::NOT_FOUND => ClientError::NotFound(error.to_string()),
                _ => ClientError::BackendRejection {
                    status: status.as_u16(),
                    message: error.to_string(),
                },
            }
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}

/// Turns a non-success metadata-service response into an error, pulling the
/// FastAPI `detail` out of the body when there is one.
pub async fn metadata_failure(response: Response, subject: &str) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message())
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        let message = if message.is_empty() {
            subject.to_string()
        } else {
            format!("{}: {}", subject, message)
        };
        return ClientError::NotFound(message);
    }

    ClientError::BackendRejection {
        status: status.as_u16(),
        message,
    }
}

/// Storage answers with XML (S3) or plain text; the body is kept verbatim.
pub async fn storage_failure(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    ClientError::Transfer {
        status: status.as_u16(),
        message: if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown").to_string()
        } else {
            body
        },
    }
}
