use async_trait::async_trait;

use crate::{
    application::error::ClientError,
    domain::models::{file::LocalFile, transfer::PresignedDescriptor},
};

/// Moves the bytes of a local file straight to storage. A failed transfer is
/// final for that descriptor; callers start over with a fresh presign.
#[async_trait]
pub trait TransferService: Send + Sync {
    async fn transfer(
        &self,
        descriptor: &PresignedDescriptor,
        file: &LocalFile,
    ) -> Result<(), ClientError>;
}
