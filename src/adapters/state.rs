use std::sync::Arc;

use crate::{
    application::{
        coordinators::FileActions,
        listing_cache::ListingCache,
        orchestrator::TransferOrchestrator,
        services::{HostSurface, MetadataService, TransferService},
    },
    domain::config::client::ClientConfig,
};

/// Everything a host needs, wired once at startup and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub metadata: Arc<dyn MetadataService>,
    pub listing: Arc<ListingCache>,
    pub orchestrator: Arc<TransferOrchestrator>,
    pub actions: Arc<FileActions>,
}

impl AppState {
    pub fn new(
        config: ClientConfig,
        metadata: Arc<dyn MetadataService>,
        transfer: Arc<dyn TransferService>,
        host: Arc<dyn HostSurface>,
    ) -> Self {
        let listing = Arc::new(ListingCache::new(Arc::clone(&metadata)));
        let orchestrator = Arc::new(TransferOrchestrator::new(
            Arc::clone(&metadata),
            transfer,
            Arc::clone(&listing),
            config.status_window,
            config.revert_policy,
        ));
        let actions = Arc::new(FileActions::new(
            Arc::clone(&metadata),
            Arc::clone(&listing),
            host,
        ));

        Self {
            config: Arc::new(config),
            metadata,
            listing,
            orchestrator,
            actions,
        }
    }
}
