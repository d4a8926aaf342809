use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Which folder a listing or an upload targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FolderScope {
    #[default]
    Root,
    Folder(String),
}

impl FolderScope {
    /// Value of the `folder_id` query parameter on `/files/list`.
    pub fn list_query_value(&self) -> &str {
        match self {
            FolderScope::Root => "null",
            FolderScope::Folder(id) => id,
        }
    }

    /// Path segment used by `/folders/{id}/contents`.
    pub fn path_segment(&self) -> &str {
        match self {
            FolderScope::Root => "root",
            FolderScope::Folder(id) => id,
        }
    }

    pub fn folder_id(&self) -> Option<&str> {
        match self {
            FolderScope::Root => None,
            FolderScope::Folder(id) => Some(id),
        }
    }
}

impl From<Option<String>> for FolderScope {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) if !id.is_empty() && id != "null" && id != "root" => FolderScope::Folder(id),
            _ => FolderScope::Root,
        }
    }
}

impl From<&FolderScope> for Option<String> {
    fn from(scope: &FolderScope) -> Self {
        scope.folder_id().map(|id| id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderFileEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContents {
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
    #[serde(default)]
    pub files: Vec<FolderFileEntry>,
}

/// Accepts RFC 3339 as well as offset-less ISO 8601, which the backend emits
/// for naive database timestamps. Offset-less values are taken as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn root_scope_uses_sentinels() {
        assert_eq!(FolderScope::Root.list_query_value(), "null");
        assert_eq!(FolderScope::Root.path_segment(), "root");
        assert_eq!(Option::<String>::from(&FolderScope::Root), None);
    }

    #[test]
    fn sentinel_strings_collapse_to_root() {
        assert_eq!(FolderScope::from(None), FolderScope::Root);
        assert_eq!(FolderScope::from(Some("null".to_string())), FolderScope::Root);
        assert_eq!(FolderScope::from(Some("root".to_string())), FolderScope::Root);
        assert_eq!(
            FolderScope::from(Some("abc".to_string())),
            FolderScope::Folder("abc".to_string())
        );
    }

    #[test]
    fn folder_contents_parse_both_timestamp_styles() {
        let contents: FolderContents = serde_json::from_str(
            r#"{
                "folders": [{"id": "d1", "name": "docs", "created_at": "2025-01-02T03:04:05+00:00"}],
                "files": [{"id": "f1", "name": "a.txt", "size": 10, "created_at": "2025-01-02T03:04:05.123456"}]
            }"#,
        )
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(contents.folders[0].created_at, expected);
        assert_eq!(
            contents.files[0].created_at.timestamp(),
            expected.timestamp()
        );
        assert_eq!(contents.files[0].size, Some(10));
    }

    #[test]
    fn folder_contents_reject_garbage_timestamp() {
        let result: Result<FolderContents, _> = serde_json::from_str(
            r#"{"folders": [{"id": "d1", "name": "docs", "created_at": "yesterday"}]}"#,
        );

        assert!(result.is_err());
    }
}
