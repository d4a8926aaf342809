use serde::Serialize;

use crate::domain::models::{file::FileRecord, transfer::TransferStatus};

#[derive(Debug, Serialize)]
pub struct UploadReport {
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub uploaded: bool,
    pub status: TransferStatus,
    #[serde(rename = "statusText")]
    pub status_text: String,
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Serialize)]
pub struct DeleteReport {
    #[serde(rename = "fileId")]
    pub file_id: String,
    pub deleted: bool,
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Serialize)]
pub struct FolderCreatedReport {
    #[serde(rename = "folderId")]
    pub folder_id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    pub status: &'static str,
}
