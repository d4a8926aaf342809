use tracing::info;

use crate::{
    adapters::{dto::file_dto::HealthReport, state::AppState},
    application::error::ClientError,
};

pub struct HealthController;

impl HealthController {
    /// GET /health on the configured backend.
    pub async fn ping(app_state: &AppState) -> Result<HealthReport, ClientError> {
        info!("Checking backend health at {}", app_state.config.api_url);
        app_state.metadata.health().await?;

        Ok(HealthReport {
            api_url: app_state.config.api_url.clone(),
            status: "ok",
        })
    }
}
