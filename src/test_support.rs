//! In-memory stand-ins for the backend and the host, shared by unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    application::{
        dto::files_dto::{ShareLink, ShareRequest},
        error::ClientError,
        services::{HostSurface, MetadataService, TransferService},
    },
    domain::models::{
        file::{FileRecord, LocalFile},
        folder::{FolderContents, FolderScope},
        transfer::PresignedDescriptor,
    },
};

pub fn record(file_id: &str, file_name: &str) -> FileRecord {
    FileRecord {
        file_id: file_id.to_string(),
        file_name: file_name.to_string(),
        mime_type: "text/plain".to_string(),
        size_bytes: 10,
        folder_id: None,
    }
}

pub fn local_file(file_name: &str, mime_type: &str, size_bytes: u64) -> LocalFile {
    LocalFile::new(
        file_name.into(),
        file_name.to_string(),
        mime_type.to_string(),
        size_bytes,
    )
}

type TransferObserver = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct BackendState {
    files: Vec<FileRecord>,
    next_id: u64,
    upload_url: Option<String>,
    list_scopes: Vec<FolderScope>,
    presign_calls: usize,
    transfer_urls: Vec<String>,
    list_error: Option<ClientError>,
    presign_error: Option<ClientError>,
    transfer_error: Option<ClientError>,
    presign_gate: Option<Arc<Notify>>,
}

/// Plays both the metadata service and storage. A successful transfer adds
/// the file to the listing the next `list_files` returns.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
    observer: Mutex<Option<TransferObserver>>,
}

impl FakeBackend {
    pub fn with_files(files: Vec<FileRecord>) -> Arc<Self> {
        let backend = Self::default();
        backend.state.lock().unwrap().files = files;
        Arc::new(backend)
    }

    pub fn files(&self) -> Vec<FileRecord> {
        self.state.lock().unwrap().files.clone()
    }

    pub fn set_files(&self, files: Vec<FileRecord>) {
        self.state.lock().unwrap().files = files;
    }

    pub fn set_upload_url(&self, url: &str) {
        self.state.lock().unwrap().upload_url = Some(url.to_string());
    }

    pub fn fail_next_list(&self, error: ClientError) {
        self.state.lock().unwrap().list_error = Some(error);
    }

    pub fn fail_presign(&self, error: ClientError) {
        self.state.lock().unwrap().presign_error = Some(error);
    }

    pub fn fail_transfer(&self, error: ClientError) {
        self.state.lock().unwrap().transfer_error = Some(error);
    }

    /// The next presign waits on `gate` before answering.
    pub fn gate_presign(&self, gate: Arc<Notify>) {
        self.state.lock().unwrap().presign_gate = Some(gate);
    }

    /// Runs `observer` at the start of every transfer and collects what it
    /// returns.
    pub fn observe_transfers<T, F>(&self, observer: F) -> Arc<Mutex<Vec<T>>>
    where
        T: Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        *self.observer.lock().unwrap() = Some(Box::new(move || {
            let value = observer();
            sink.lock().unwrap().push(value);
        }));
        seen
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_scopes.len()
    }

    pub fn list_scopes(&self) -> Vec<FolderScope> {
        self.state.lock().unwrap().list_scopes.clone()
    }

    pub fn presign_calls(&self) -> usize {
        self.state.lock().unwrap().presign_calls
    }

    pub fn transfer_urls(&self) -> Vec<String> {
        self.state.lock().unwrap().transfer_urls.clone()
    }
}

#[async_trait]
impl MetadataService for FakeBackend {
    async fn list_files(&self, scope: &FolderScope) -> Result<Vec<FileRecord>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.list_scopes.push(scope.clone());
        if let Some(error) = state.list_error.take() {
            return Err(error);
        }
        Ok(state
            .files
            .iter()
            .filter(|f| &FolderScope::from(f.folder_id.clone()) == scope)
            .cloned()
            .collect())
    }

    async fn presign_upload(
        &self,
        _file: &LocalFile,
        _scope: &FolderScope,
    ) -> Result<PresignedDescriptor, ClientError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.presign_calls += 1;
            state.presign_gate.take()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.presign_error.take() {
            return Err(error);
        }
        state.next_id += 1;
        let file_id = format!("file-{}", state.next_id);
        let upload_url = state
            .upload_url
            .clone()
            .unwrap_or_else(|| format!("https://storage.example/{}", file_id));

        let mut descriptor = PresignedDescriptor::new(upload_url);
        descriptor.file_id = Some(file_id);
        Ok(descriptor)
    }

    async fn presign_download(&self, file_id: &str) -> Result<String, ClientError> {
        let state = self.state.lock().unwrap();
        state
            .files
            .iter()
            .find(|f| f.file_id == file_id)
            .map(|f| format!("https://storage.example/{}?signature=abc", f.file_id))
            .ok_or_else(|| ClientError::NotFound(file_id.to_string()))
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        let before = state.files.len();
        state.files.retain(|f| f.file_id != file_id);
        if state.files.len() == before {
            return Err(ClientError::NotFound(file_id.to_string()));
        }
        Ok(())
    }

    async fn create_folder(&self, _name: &str, _parent: &FolderScope) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        Ok(format!("folder-{}", state.next_id))
    }

    async fn folder_contents(&self, _scope: &FolderScope) -> Result<FolderContents, ClientError> {
        Ok(FolderContents::default())
    }

    async fn delete_folder(&self, _folder_id: &str) -> Result<(), ClientError> {
        Ok(())
    }

    async fn create_share_link(
        &self,
        file_id: &str,
        _request: ShareRequest,
    ) -> Result<ShareLink, ClientError> {
        let state = self.state.lock().unwrap();
        if !state.files.iter().any(|f| f.file_id == file_id) {
            return Err(ClientError::NotFound(file_id.to_string()));
        }
        Ok(ShareLink {
            public_url: format!("http://localhost:8000/share/token-{}", file_id),
        })
    }

    async fn resolve_share(&self, token: &str) -> Result<String, ClientError> {
        Ok(format!("https://storage.example/shared/{}", token))
    }

    async fn health(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

#[async_trait]
impl TransferService for FakeBackend {
    async fn transfer(
        &self,
        descriptor: &PresignedDescriptor,
        file: &LocalFile,
    ) -> Result<(), ClientError> {
        if let Some(observer) = self.observer.lock().unwrap().as_ref() {
            observer();
        }

        let mut state = self.state.lock().unwrap();
        state.transfer_urls.push(descriptor.upload_url.clone());
        if let Some(error) = state.transfer_error.take() {
            return Err(error);
        }

        state.files.push(FileRecord {
            file_id: descriptor.file_id.clone().unwrap_or_default(),
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size_bytes,
            folder_id: None,
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingHost {
    opened: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl HostSurface for RecordingHost {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
