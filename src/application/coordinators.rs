use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::{
    dto::files_dto::{ShareLink, ShareRequest},
    error::ClientError,
    listing_cache::ListingCache,
    services::{HostSurface, MetadataService},
};

/// Single-phase, user-triggered file actions. Failures go to the host as a
/// blocking alert; the error is also returned so the caller can stop.
pub struct FileActions {
    metadata: Arc<dyn MetadataService>,
    listing: Arc<ListingCache>,
    host: Arc<dyn HostSurface>,
}

impl FileActions {
    pub fn new(
        metadata: Arc<dyn MetadataService>,
        listing: Arc<ListingCache>,
        host: Arc<dyn HostSurface>,
    ) -> Self {
        Self {
            metadata,
            listing,
            host,
        }
    }

    /// Fetches a presigned download URL and opens it. No local state changes.
    pub async fn download(&self, file_id: &str) -> Result<String, ClientError> {
        match self.metadata.presign_download(file_id).await {
            Ok(url) => {
                info!("Opening download URL for {}", file_id);
                self.host.open_url(&url);
                Ok(url)
            }
            Err(e) => {
                error!("Download of {} failed: {}", file_id, e);
                self.host.alert("Download failed");
                Err(e)
            }
        }
    }

    /// Deletes the file and refreshes the listing. On failure the listing is
    /// left exactly as it was and no refresh is issued.
    pub async fn delete(&self, file_id: &str) -> Result<(), ClientError> {
        if let Err(e) = self.metadata.delete_file(file_id).await {
            error!("Delete of {} failed: {}", file_id, e);
            self.host.alert("Delete failed");
            return Err(e);
        }

        info!("Deleted {}", file_id);
        if let Err(e) = self.listing.refresh().await {
            warn!("Delete of {} succeeded but listing refresh failed: {}", file_id, e);
        }
        Ok(())
    }

    /// Creates a public share link and hands it to the host.
    pub async fn share(
        &self,
        file_id: &str,
        request: ShareRequest,
    ) -> Result<ShareLink, ClientError> {
        match self.metadata.create_share_link(file_id, request).await {
            Ok(link) => {
                info!("Created share link for {}", file_id);
                self.host.open_url(&link.public_url);
                Ok(link)
            }
            Err(e) => {
                error!("Sharing {} failed: {}", file_id, e);
                self.host.alert("Share failed");
                Err(e)
            }
        }
    }
}
