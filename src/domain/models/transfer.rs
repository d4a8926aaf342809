use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Authorization for exactly one direct-to-storage upload. Never persisted,
/// dropped once the transfer attempt finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedDescriptor {
    /// Id the backend reserved for the object, when it reports one.
    pub file_id: Option<String>,
    pub upload_url: String,
    /// Extra headers storage requires on the PUT, besides `Content-Type`.
    pub headers: BTreeMap<String, String>,
}

impl PresignedDescriptor {
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            file_id: None,
            upload_url: upload_url.into(),
            headers: BTreeMap::new(),
        }
    }
}

/// The user-facing upload signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

impl TransferStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            TransferStatus::Idle => "",
            TransferStatus::InProgress => "Uploading...",
            TransferStatus::Succeeded => "Upload successful",
            TransferStatus::Failed => "Upload failed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Where the orchestrator is in the two-phase upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    AwaitingPresign,
    Transferring,
    Settling,
}
