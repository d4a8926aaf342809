pub mod auth;
mod error;
mod http_metadata_client;
mod http_transfer_executor;

pub use auth::{AuthHeaderProvider, StaticCredential};
pub use http_metadata_client::HttpMetadataClient;
pub use http_transfer_executor::HttpTransferExecutor;

use std::sync::Arc;

use crate::{
    application::{
        error::ClientError,
        services::{MetadataService, TransferService},
    },
    domain::config::client::ClientConfig,
};

/// Builds the HTTP-backed metadata client and transfer executor for `config`.
pub fn create_services(
    config: &ClientConfig,
) -> Result<(Arc<dyn MetadataService>, Arc<dyn TransferService>), ClientError> {
    let auth = Arc::new(StaticCredential::from_config(config)) as Arc<dyn AuthHeaderProvider>;

    let metadata = HttpMetadataClient::new(config, auth)?;
    let transfer = HttpTransferExecutor::new(config)?;

    Ok((Arc::new(metadata), Arc::new(transfer)))
}
