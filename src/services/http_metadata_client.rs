use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    application::{
        dto::{
            files_dto::{
                DownloadUrlResponse, ListFilesResponse, PresignUploadRequest, PresignUploadResponse,
                ShareLink, ShareRequest,
            },
            folders_dto::{CreateFolderRequest, CreateFolderResponse},
        },
        error::ClientError,
        services::MetadataService,
    },
    domain::{
        config::client::ClientConfig,
        models::{
            file::{FileRecord, LocalFile},
            folder::{FolderContents, FolderScope},
            transfer::PresignedDescriptor,
        },
    },
    services::{auth::AuthHeaderProvider, error::metadata_failure},
};

/// Talks to the CloudBox backend. Every call is a single request carrying
/// the configured credential.
pub struct HttpMetadataClient {
    client: Client,
    base_url: Url,
    auth: Arc<dyn AuthHeaderProvider>,
}

impl HttpMetadataClient {
    pub fn new(config: &ClientConfig, auth: Arc<dyn AuthHeaderProvider>) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::Config(format!("invalid API URL '{}': {}", config.api_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL '{}' cannot be used as a base",
                config.api_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments.iter());
        }
        url
    }

    async fn execute(&self, request: RequestBuilder, subject: &str) -> Result<Response, ClientError> {
        let response = request
            .header(AUTHORIZATION, self.auth.authorization()?)
            .send()
            .await?;

        debug!("{} -> {}", subject, response.status());

        if !response.status().is_success() {
            return Err(metadata_failure(response, subject).await);
        }

        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        subject: &str,
    ) -> Result<T, ClientError> {
        let response = self.execute(request, subject).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MetadataService for HttpMetadataClient {
    async fn list_files(&self, scope: &FolderScope) -> Result<Vec<FileRecord>, ClientError> {
        let request = self
            .client
            .get(self.endpoint(&["files", "list"]))
            .query(&[("folder_id", scope.list_query_value())]);

        let body: ListFilesResponse = self.execute_json(request, "list files").await?;
        Ok(body.into())
    }

    async fn presign_upload(
        &self,
        file: &LocalFile,
        scope: &FolderScope,
    ) -> Result<PresignedDescriptor, ClientError> {
        let request = self
            .client
            .post(self.endpoint(&["files", "presign-upload"]))
            .json(&PresignUploadRequest::for_file(file, scope));

        let body: PresignUploadResponse = self
            .execute_json(request, &format!("presign upload of {}", file.file_name))
            .await?;
        body.try_into()
    }

    async fn presign_download(&self, file_id: &str) -> Result<String, ClientError> {
        let request = self
            .client
            .get(self.endpoint(&["files", file_id, "download-url"]));

        let body: DownloadUrlResponse = self
            .execute_json(request, &format!("file {}", file_id))
            .await?;
        Ok(body.download_url)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ClientError> {
        let request = self.client.delete(self.endpoint(&["files", file_id]));
        self.execute(request, &format!("file {}", file_id)).await?;
        Ok(())
    }

    async fn create_folder(&self, name: &str, parent: &FolderScope) -> Result<String, ClientError> {
        let request = self
            .client
            .post(self.endpoint(&["folders"]))
            .json(&CreateFolderRequest {
                name: name.to_string(),
                parent_folder_id: parent.into(),
            });

        let body: CreateFolderResponse = self
            .execute_json(request, &format!("create folder {}", name))
            .await?;
        Ok(body.folder_id)
    }

    async fn folder_contents(&self, scope: &FolderScope) -> Result<FolderContents, ClientError> {
        let request = self
            .client
            .get(self.endpoint(&["folders", scope.path_segment(), "contents"]));

        self.execute_json(request, &format!("folder {}", scope.path_segment()))
            .await
    }

    async fn delete_folder(&self, folder_id: &str) -> Result<(), ClientError> {
        let request = self.client.delete(self.endpoint(&["folders", folder_id]));
        self.execute(request, &format!("folder {}", folder_id)).await?;
        Ok(())
    }

    async fn create_share_link(
        &self,
        file_id: &str,
        request: ShareRequest,
    ) -> Result<ShareLink, ClientError> {
        let request = self
            .client
            .post(self.endpoint(&["files", file_id, "share"]))
            .json(&request);

        self.execute_json(request, &format!("file {}", file_id)).await
    }

    async fn resolve_share(&self, token: &str) -> Result<String, ClientError> {
        let request = self.client.get(self.endpoint(&["share", token]));

        let body: DownloadUrlResponse = self
            .execute_json(request, "share link")
            .await?;
        Ok(body.download_url)
    }

    async fn health(&self) -> Result<(), ClientError> {
        let request = self.client.get(self.endpoint(&["health"]));
        self.execute(request, "health check").await?;
        Ok(())
    }
}
