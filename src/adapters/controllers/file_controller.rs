use std::path::Path;

use tracing::info;

use crate::{
    adapters::{
        dto::file_dto::{DeleteReport, UploadReport},
        state::AppState,
    },
    application::{
        dto::files_dto::{ShareLink, ShareRequest},
        error::ClientError,
        orchestrator::UploadOutcome,
    },
    domain::models::{
        file::{FileRecord, LocalFile},
        folder::FolderScope,
        transfer::TransferStatus,
    },
};

pub struct FileController;

impl FileController {
    pub async fn list_files(
        app_state: &AppState,
        scope: FolderScope,
    ) -> Result<Vec<FileRecord>, ClientError> {
        app_state.listing.set_scope(scope);
        app_state.listing.refresh().await
    }

    /// Selects `path` and runs one upload, echoing each status change on
    /// stderr the way a UI would render the status line.
    pub async fn upload_file(
        app_state: &AppState,
        path: &Path,
        scope: FolderScope,
    ) -> Result<UploadReport, ClientError> {
        let file = LocalFile::from_path(path)
            .await
            .map_err(|e| ClientError::LocalFile(format!("{}: {}", path.display(), e)))?;
        let file_name = file.file_name.clone();

        app_state.listing.set_scope(scope);
        app_state.orchestrator.select(file);

        let mut status_rx = app_state.orchestrator.subscribe_status();
        let status_line = tokio::spawn(async move {
            while status_rx.changed().await.is_ok() {
                let status = *status_rx.borrow_and_update();
                if status != TransferStatus::Idle {
                    eprintln!("{}", status);
                }
            }
        });

        let outcome = app_state.orchestrator.start_upload().await;
        status_line.abort();

        let status = app_state.orchestrator.status();
        match outcome {
            UploadOutcome::Uploaded { file_id } => {
                info!("Uploaded {} as {:?}", file_name, file_id);
                Ok(UploadReport {
                    file_id,
                    file_name,
                    uploaded: true,
                    status,
                    status_text: status.display_text().to_string(),
                    files: app_state.listing.files(),
                })
            }
            UploadOutcome::Failed(e) => Err(e),
            UploadOutcome::Ignored => Ok(UploadReport {
                file_id: None,
                file_name,
                uploaded: false,
                status,
                status_text: status.display_text().to_string(),
                files: app_state.listing.files(),
            }),
        }
    }

    pub async fn download_file(app_state: &AppState, file_id: &str) -> Result<String, ClientError> {
        app_state.actions.download(file_id).await
    }

    pub async fn delete_file(app_state: &AppState, file_id: &str) -> Result<DeleteReport, ClientError> {
        app_state.actions.delete(file_id).await?;

        Ok(DeleteReport {
            file_id: file_id.to_string(),
            deleted: true,
            files: app_state.listing.files(),
        })
    }

    pub async fn share_file(
        app_state: &AppState,
        file_id: &str,
        expires_in_hours: u32,
        max_downloads: Option<u32>,
    ) -> Result<ShareLink, ClientError> {
        app_state
            .actions
            .share(
                file_id,
                ShareRequest {
                    expires_in_hours,
                    max_downloads,
                },
            )
            .await
    }

    pub async fn open_share(app_state: &AppState, token: &str) -> Result<String, ClientError> {
        app_state.metadata.resolve_share(token).await
    }
}
