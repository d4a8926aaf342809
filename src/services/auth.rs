use reqwest::header::HeaderValue;

use crate::{application::error::ClientError, domain::config::client::ClientConfig};

/// Supplies the `Authorization` header sent with every metadata call.
pub trait AuthHeaderProvider: Send + Sync {
    fn authorization(&self) -> Result<HeaderValue, ClientError>;
}

/// A fixed `<scheme> <token>` credential.
pub struct StaticCredential {
    scheme: String,
    token: String,
}

impl StaticCredential {
    pub fn new(scheme: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.auth_scheme.clone(), config.auth_token.clone())
    }
}

impl AuthHeaderProvider for StaticCredential {
    fn authorization(&self) -> Result<HeaderValue, ClientError> {
        let mut value = HeaderValue::from_str(&format!("{} {}", self.scheme, self.token))
            .map_err(|_| {
                ClientError::Config("credential contains characters not allowed in a header".into())
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}
