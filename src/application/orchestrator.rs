use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    application::{
        error::ClientError,
        listing_cache::ListingCache,
        services::{MetadataService, TransferService},
        status::StatusSignal,
    },
    domain::{
        config::client::RevertPolicy,
        models::{
            file::LocalFile,
            transfer::{TransferStatus, UploadPhase},
        },
    },
};

/// Result of one `start_upload` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Nothing selected, or an upload was already in flight.
    Ignored,
    Uploaded { file_id: Option<String> },
    Failed(ClientError),
}

#[derive(Debug, Default)]
struct UploadState {
    phase: UploadPhase,
    selection: Option<LocalFile>,
}

/// Drives the two-phase upload: presign with the metadata service, then PUT
/// the bytes straight to storage.
///
/// At most one upload is in flight per instance. Selection and status are
/// owned here and only read by the host.
pub struct TransferOrchestrator {
    metadata: Arc<dyn MetadataService>,
    transfer: Arc<dyn TransferService>,
    listing: Arc<ListingCache>,
    state: Mutex<UploadState>,
    status: StatusSignal,
}

impl TransferOrchestrator {
    pub fn new(
        metadata: Arc<dyn MetadataService>,
        transfer: Arc<dyn TransferService>,
        listing: Arc<ListingCache>,
        status_window: std::time::Duration,
        revert_policy: RevertPolicy,
    ) -> Self {
        Self {
            metadata,
            transfer,
            listing,
            state: Mutex::new(UploadState::default()),
            status: StatusSignal::new(status_window, revert_policy),
        }
    }

    /// Replaces the pending selection.
    pub fn select(&self, file: LocalFile) {
        info!("Selected {} ({} bytes, {})", file.file_name, file.size_bytes, file.mime_type);
        self.state.lock().unwrap().selection = Some(file);
    }

    pub fn clear_selection(&self) {
        self.state.lock().unwrap().selection = None;
    }

    pub fn selection(&self) -> Option<LocalFile> {
        self.state.lock().unwrap().selection.clone()
    }

    pub fn phase(&self) -> UploadPhase {
        self.state.lock().unwrap().phase
    }

    pub fn status(&self) -> TransferStatus {
        self.status.current()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<TransferStatus> {
        self.status.subscribe()
    }

    pub fn listing(&self) -> &Arc<ListingCache> {
        &self.listing
    }

    /// Uploads the current selection. Ignored when nothing is selected or
    /// when an upload is already running.
    pub async fn start_upload(&self) -> UploadOutcome {
        let file = {
            let mut state = self.state.lock().unwrap();
            if state.phase != UploadPhase::Idle {
                info!("Upload already in progress ({:?}), ignoring", state.phase);
                return UploadOutcome::Ignored;
            }
            let Some(file) = state.selection.clone() else {
                info!("No file selected, nothing to upload");
                return UploadOutcome::Ignored;
            };
            state.phase = UploadPhase::AwaitingPresign;
            file
        };

        let mut in_flight = InFlight {
            orchestrator: self,
            armed: true,
        };

        self.status.publish(TransferStatus::InProgress);
        let scope = self.listing.scope();
        info!("Requesting upload URL for {} in {:?}", file.file_name, scope);

        let descriptor = match self.metadata.presign_upload(&file, &scope).await {
            Ok(descriptor) => descriptor,
            Err(e) => {
                in_flight.disarm();
                warn!("Presign for {} failed: {}", file.file_name, e);
                self.finish(TransferStatus::Failed);
                return UploadOutcome::Failed(e);
            }
        };

        self.set_phase(UploadPhase::Transferring);
        info!("Transferring {} to storage", file.file_name);
        let result = self.transfer.transfer(&descriptor, &file).await;
        in_flight.disarm();

        {
            let mut state = self.state.lock().unwrap();
            state.phase = UploadPhase::Settling;
            state.selection = None;
        }

        match result {
            Ok(()) => {
                info!("Upload of {} succeeded", file.file_name);
                self.finish(TransferStatus::Succeeded);

                if let Err(e) = self.listing.refresh().await {
                    warn!("Upload succeeded but listing refresh failed: {}", e);
                }

                UploadOutcome::Uploaded {
                    file_id: descriptor.file_id,
                }
            }
            Err(e) => {
                warn!("Transfer of {} failed: {}", file.file_name, e);
                self.finish(TransferStatus::Failed);
                UploadOutcome::Failed(e)
            }
        }
    }

    fn set_phase(&self, phase: UploadPhase) {
        self.state.lock().unwrap().phase = phase;
    }

    /// Publishes the final status and returns to `Idle` under the state lock,
    /// so a start that sees `Idle` always publishes after this status.
    fn finish(&self, status: TransferStatus) {
        let mut state = self.state.lock().unwrap();
        self.status.publish_transient(status);
        state.phase = UploadPhase::Idle;
    }
}

/// Armed while an upload is between its start and its transfer result. If the
/// `start_upload` future is dropped in that span the upload counts as failed.
struct InFlight<'a> {
    orchestrator: &'a TransferOrchestrator,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Upload abandoned before it settled");
            self.orchestrator.finish(TransferStatus::Failed);
        }
    }
}
