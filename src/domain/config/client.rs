use std::time::Duration;

use crate::application::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_AUTH_SCHEME: &str = "Bearer";
pub const DEFAULT_STATUS_WINDOW: Duration = Duration::from_secs(2);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// What happens to a pending status revert when a newer status is published
/// before it fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevertPolicy {
    /// The newer status cancels the pending revert.
    #[default]
    Supersede,
    /// The revert always fires, even over a newer status.
    Detached,
}

impl std::str::FromStr for RevertPolicy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supersede" => Ok(RevertPolicy::Supersede),
            "detached" => Ok(RevertPolicy::Detached),
            other => Err(ClientError::Config(format!(
                "unknown revert policy '{}', expected 'supersede' or 'detached'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub auth_scheme: String,
    pub auth_token: String,
    pub status_window: Duration,
    pub request_timeout: Duration,
    pub revert_policy: RevertPolicy,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            auth_token: auth_token.into(),
            status_window: DEFAULT_STATUS_WINDOW,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            revert_policy: RevertPolicy::default(),
        }
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `CLOUDBOX_*` settings through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("CLOUDBOX_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let auth_token = lookup("CLOUDBOX_AUTH_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ClientError::Config("CLOUDBOX_AUTH_TOKEN environment variable must be set".into())
            })?;

        let mut config = Self::new(api_url, auth_token);

        if let Some(scheme) = lookup("CLOUDBOX_AUTH_SCHEME") {
            config.auth_scheme = scheme;
        }

        if let Some(ms) = lookup("CLOUDBOX_STATUS_WINDOW_MS") {
            let ms = ms.parse::<u64>().map_err(|_| {
                ClientError::Config(format!("CLOUDBOX_STATUS_WINDOW_MS must be an integer, got '{}'", ms))
            })?;
            config.status_window = Duration::from_millis(ms);
        }

        if let Some(secs) = lookup("CLOUDBOX_REQUEST_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|_| {
                ClientError::Config(format!(
                    "CLOUDBOX_REQUEST_TIMEOUT_SECS must be an integer, got '{}'",
                    secs
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(policy) = lookup("CLOUDBOX_REVERT_POLICY") {
            config.revert_policy = policy.parse()?;
        }

        Ok(config)
    }
}
