use async_trait::async_trait;
use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Body, Client,
};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::{
    application::{error::ClientError, services::TransferService},
    domain::{
        config::client::ClientConfig,
        models::{file::LocalFile, transfer::PresignedDescriptor},
    },
    services::error::storage_failure,
};

/// PUTs file bytes straight to a presigned storage URL. The URL is the
/// capability, so no credential header is attached.
pub struct HttpTransferExecutor {
    client: Client,
}

impl HttpTransferExecutor {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TransferService for HttpTransferExecutor {
    async fn transfer(
        &self,
        descriptor: &PresignedDescriptor,
        file: &LocalFile,
    ) -> Result<(), ClientError> {
        let local_error = |e: std::io::Error| {
            ClientError::LocalFile(format!("{}: {}", file.path.display(), e))
        };
        let handle = tokio::fs::File::open(&file.path).await.map_err(local_error)?;
        let size = handle.metadata().await.map_err(local_error)?.len();

        if size != file.size_bytes {
            warn!(
                "{} changed size since it was selected ({} -> {} bytes)",
                file.file_name, file.size_bytes, size
            );
        }

        let mut request = self
            .client
            .put(&descriptor.upload_url)
            .header(CONTENT_TYPE, &file.mime_type);

        for (name, value) in &descriptor.headers {
            if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                if !value.eq_ignore_ascii_case(&file.mime_type) {
                    warn!(
                        "Presign asked for Content-Type {} but {} is {}, keeping the file's type",
                        value, file.file_name, file.mime_type
                    );
                }
                continue;
            }
            if name.eq_ignore_ascii_case(CONTENT_LENGTH.as_str()) {
                continue;
            }
            request = request.header(name.as_str(), value.as_str());
        }

        // Presigned PUTs reject chunked bodies, so the length is sent up front.
        let response = request
            .header(CONTENT_LENGTH, size)
            .body(Body::wrap_stream(ReaderStream::new(handle)))
            .send()
            .await?;

        debug!("PUT {} -> {}", file.file_name, response.status());

        if !response.status().is_success() {
            return Err(storage_failure(response).await);
        }

        Ok(())
    }
}
