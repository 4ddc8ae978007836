//! Configuration File
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::domain::entities::file_item::FileItem;

/// 設定ファイル
///
/// すべて任意項目。足りない値はCLI引数で補う
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub container_name: Option<String>,
    pub endpoint: Option<String>,
    pub storage_account_name: Option<String>,
    pub storage_account_key: Option<String>,

    #[serde(default)]
    pub source_files: Vec<FileItem>,
    pub destination_files: Option<Vec<FileItem>>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read config file: {}", expanded))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", expanded))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blobcopy.json");
        fs::write(
            &path,
            r#"{
  "container_name": "releases",
  "endpoint": "https://myaccount.blob.core.windows.net",
  "storage_account_name": "myaccount",
  "storage_account_key": "c2VjcmV0",
  "source_files": [
    { "path": "out/app.zip" },
    { "path": "out/readme.txt", "metadata": { "ContentType": "text/plain" } }
  ],
  "destination_files": [
    { "path": "v1/app.zip" },
    { "path": "v1/readme.txt" }
  ]
}"#,
        )
        .unwrap();

        let config = Config::load(&path.to_string_lossy()).unwrap();

        assert_eq!(config.container_name.as_deref(), Some("releases"));
        assert_eq!(config.source_files.len(), 2);
        assert_eq!(config.source_files[1].content_type(), Some("text/plain"));
        assert_eq!(config.destination_files.unwrap()[0].path, "v1/app.zip");
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.json");
        fs::write(&path, r#"{ "endpoint": "http://127.0.0.1:10000/devstoreaccount1" }"#).unwrap();

        let config = Config::load(&path.to_string_lossy()).unwrap();

        assert!(config.container_name.is_none());
        assert!(config.source_files.is_empty());
        assert!(config.destination_files.is_none());
    }

    #[test]
    fn test_load_unknown_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("typo.json");
        fs::write(&path, r#"{ "containr_name": "releases" }"#).unwrap();

        assert!(Config::load(&path.to_string_lossy()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/blobcopy.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
