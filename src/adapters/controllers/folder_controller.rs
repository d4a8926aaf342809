use tracing::info;

use crate::{
    adapters::{dto::file_dto::FolderCreatedReport, state::AppState},
    application::error::ClientError,
    domain::models::folder::{FolderContents, FolderScope},
};

pub struct FolderController;

impl FolderController {
    pub async fn create_folder(
        app_state: &AppState,
        name: &str,
        parent: FolderScope,
    ) -> Result<FolderCreatedReport, ClientError> {
        let folder_id = app_state.metadata.create_folder(name, &parent).await?;
        info!("Created folder {} ({}) under {:?}", name, folder_id, parent);

        Ok(FolderCreatedReport {
            folder_id,
            name: name.to_string(),
        })
    }

    pub async fn folder_contents(
        app_state: &AppState,
        scope: FolderScope,
    ) -> Result<FolderContents, ClientError> {
        app_state.metadata.folder_contents(&scope).await
    }

    /// Deleting the folder currently scoped by the listing moves the listing
    /// back to the root.
    pub async fn delete_folder(app_state: &AppState, folder_id: &str) -> Result<(), ClientError> {
        app_state.metadata.delete_folder(folder_id).await?;
        info!("Deleted folder {}", folder_id);

        if app_state.listing.scope().folder_id() == Some(folder_id) {
            app_state.listing.set_scope(FolderScope::Root);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::config::client::ClientConfig,
        test_support::{FakeBackend, RecordingHost},
    };
    use std::sync::Arc;

    fn state() -> AppState {
        let backend = FakeBackend::with_files(vec![]);
        AppState::new(
            ClientConfig::new("http://127.0.0.1:8000", "t"),
            backend.clone(),
            backend,
            Arc::new(RecordingHost::default()),
        )
    }

    #[tokio::test]
    async fn deleting_scoped_folder_resets_listing_scope() {
        let app_state = state();
        let created = FolderController::create_folder(&app_state, "docs", FolderScope::Root)
            .await
            .unwrap();
        app_state
            .listing
            .set_scope(FolderScope::Folder(created.folder_id.clone()));

        FolderController::delete_folder(&app_state, &created.folder_id)
            .await
            .unwrap();

        assert_eq!(app_state.listing.scope(), FolderScope::Root);
    }
}
