use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::{
    application::{error::ClientError, services::MetadataService},
    domain::models::{file::FileRecord, folder::FolderScope},
};

/// Process-local snapshot of the files in one folder scope.
///
/// The snapshot is only ever replaced wholesale by [`ListingCache::refresh`].
/// Overlapping refreshes are not serialized: whichever response lands last
/// wins.
pub struct ListingCache {
    metadata: Arc<dyn MetadataService>,
    scope: Mutex<FolderScope>,
    files: Mutex<Vec<FileRecord>>,
}

impl ListingCache {
    pub fn new(metadata: Arc<dyn MetadataService>) -> Self {
        Self::with_scope(metadata, FolderScope::Root)
    }

    pub fn with_scope(metadata: Arc<dyn MetadataService>, scope: FolderScope) -> Self {
        Self {
            metadata,
            scope: Mutex::new(scope),
            files: Mutex::new(Vec::new()),
        }
    }

    pub fn scope(&self) -> FolderScope {
        self.scope.lock().unwrap().clone()
    }

    /// Changes the scope used by later refreshes. The current snapshot is
    /// left alone until the next refresh.
    pub fn set_scope(&self, scope: FolderScope) {
        *self.scope.lock().unwrap() = scope;
    }

    pub fn files(&self) -> Vec<FileRecord> {
        self.files.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-queries the backend and replaces the snapshot. On failure the
    /// previous snapshot is kept and the error is handed back.
    pub async fn refresh(&self) -> Result<Vec<FileRecord>, ClientError> {
        let scope = self.scope();

        let files = match self.metadata.list_files(&scope).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Listing refresh for {:?} failed, keeping previous snapshot: {}", scope, e);
                return Err(e);
            }
        };

        if self.scope() != scope {
            info!("Scope changed while listing {:?}, discarding response", scope);
            return Ok(self.files());
        }

        info!("Listing refreshed for {:?}: {} file(s)", scope, files.len());
        *self.files.lock().unwrap() = files.clone();

        Ok(files)
    }
}
