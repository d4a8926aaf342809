use async_trait::async_trait;

use crate::{
    application::{
        dto::files_dto::{ShareLink, ShareRequest},
        error::ClientError,
    },
    domain::models::{
        file::{FileRecord, LocalFile},
        folder::{FolderContents, FolderScope},
        transfer::PresignedDescriptor,
    },
};

/// One backend operation per method, one network call per invocation. No
/// implementation retries.
#[async_trait]
pub trait MetadataService: Send + Sync {
    async fn list_files(&self, scope: &FolderScope) -> Result<Vec<FileRecord>, ClientError>;
    async fn presign_upload(
        &self,
        file: &LocalFile,
        scope: &FolderScope,
    ) -> Result<PresignedDescriptor, ClientError>;
    async fn presign_download(&self, file_id: &str) -> Result<String, ClientError>;
    async fn delete_file(&self, file_id: &str) -> Result<(), ClientError>;

    async fn create_folder(&self, name: &str, parent: &FolderScope) -> Result<String, ClientError>;
    async fn folder_contents(&self, scope: &FolderScope) -> Result<FolderContents, ClientError>;
    async fn delete_folder(&self, folder_id: &str) -> Result<(), ClientError>;
    async fn create_share_link(
        &self,
        file_id: &str,
        request: ShareRequest,
    ) -> Result<ShareLink, ClientError>;
    async fn resolve_share(&self, token: &str) -> Result<String, ClientError>;
    async fn health(&self) -> Result<(), ClientError>;
}
