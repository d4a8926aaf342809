use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    application::error::ClientError,
    domain::models::{
        file::{FileRecord, LocalFile},
        folder::FolderScope,
        transfer::PresignedDescriptor,
    },
};

#[derive(Debug, Deserialize, Default)]
pub struct ListFilesResponse {
    #[serde(default)]
    pub files: Option<Vec<FileRecord>>,
}

impl From<ListFilesResponse> for Vec<FileRecord> {
    fn from(value: ListFilesResponse) -> Self {
        value.files.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PresignUploadRequest {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub folder_id: Option<String>,
}

impl PresignUploadRequest {
    pub fn for_file(file: &LocalFile, scope: &FolderScope) -> Self {
        Self {
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size_bytes,
            folder_id: scope.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PresignUploadResponse {
    #[serde(default)]
    pub file_id: Option<String>,
    pub upload_url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl TryFrom<PresignUploadResponse> for PresignedDescriptor {
    type Error = ClientError;

    fn try_from(value: PresignUploadResponse) -> Result<Self, Self::Error> {
        reqwest::Url::parse(&value.upload_url).map_err(|e| ClientError::BackendRejection {
            status: 200,
            message: format!("presign returned an unusable upload_url: {}", e),
        })?;

        Ok(PresignedDescriptor {
            file_id: value.file_id,
            upload_url: value.upload_url,
            headers: value.headers,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadUrlResponse {
    #[serde(alias = "url")]
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ShareRequest {
    pub expires_in_hours: u32,
    pub max_downloads: Option<u32>,
}

impl Default for ShareRequest {
    fn default() -> Self {
        Self {
            expires_in_hours: 24,
            max_downloads: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareLink {
    pub public_url: String,
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_with_null_files_is_empty() {
        let response: ListFilesResponse = serde_json::from_str(r#"{"files": null}"#).unwrap();
        assert!(Vec::<FileRecord>::from(response).is_empty());

        let response: ListFilesResponse = serde_json::from_str("{}").unwrap();
        assert!(Vec::<FileRecord>::from(response).is_empty());
    }

    #[test]
    fn presign_request_serializes_root_as_null() {
        let file = LocalFile::new("a.txt".into(), "a.txt".into(), "text/plain".into(), 10);
        let body = serde_json::to_value(PresignUploadRequest::for_file(&file, &FolderScope::Root)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "file_name": "a.txt",
                "mime_type": "text/plain",
                "size_bytes": 10,
                "folder_id": null
            })
        );
    }

    #[test]
    fn presign_response_with_bad_url_is_rejected() {
        let response = PresignUploadResponse {
            file_id: Some("f1".into()),
            upload_url: "not a url".into(),
            headers: BTreeMap::new(),
        };

        let err = PresignedDescriptor::try_from(response).unwrap_err();
        assert!(matches!(err, ClientError::BackendRejection { .. }));
    }

    #[test]
    fn download_url_accepts_both_field_names() {
        let a: DownloadUrlResponse = serde_json::from_str(r#"{"download_url": "https://s3/x"}"#).unwrap();
        let b: DownloadUrlResponse = serde_json::from_str(r#"{"url": "https://s3/y"}"#).unwrap();

        assert_eq!(a.download_url, "https://s3/x");
        assert_eq!(b.download_url, "https://s3/y");
    }

    #[test]
    fn error_body_message_handles_structured_detail() {
        let plain: ErrorBody = serde_json::from_str(r#"{"detail": "File not found"}"#).unwrap();
        assert_eq!(plain.message(), "File not found");

        let structured: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#).unwrap();
        assert!(structured.message().contains("field required"));
    }
}
