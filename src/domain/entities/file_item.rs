//! # FileItem Entity
//!
//! ファイル記述子（パスとメタデータ）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::CopyError;

/// Content-Type を指定するメタデータ名
pub const CONTENT_TYPE: &str = "ContentType";

/// ファイル記述子
///
/// ビルドシステムのアイテムと同じく、パスと任意のメタデータを持つ
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileItem {
    /// ファイルパス（宛先の場合はBlob名）
    pub path: String,
    /// メタデータ（例: "ContentType"）
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl FileItem {
    /// メタデータなしのアイテムを作成
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// メタデータを追加したアイテムを返す
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// メタデータを取得します（名前の大文字小文字は区別しない）。
    ///
    /// # 例
    ///
    /// ```
    /// use blobcopy::domain::entities::file_item::FileItem;
    ///
    /// let item = FileItem::new("site.css").with_metadata("ContentType", "text/css");
    /// assert_eq!(item.metadata("contenttype"), Some("text/css"));
    /// assert_eq!(item.metadata("CacheControl"), None);
    /// ```
    pub fn metadata(&self, name: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// 空でない Content-Type メタデータを返す
    pub fn content_type(&self) -> Option<&str> {
        self.metadata(CONTENT_TYPE).filter(|value| !value.is_empty())
    }

    /// パスの最後のセグメントを返す
    ///
    /// `/` と `\` の両方を区切り文字として扱う
    pub fn file_name(&self) -> Result<&str, CopyError> {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CopyError::MissingFileName(self.path.clone()))
    }
}

impl fmt::Display for FileItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (name, value) in &self.metadata {
            write!(f, ";{}={}", name, value)?;
        }
        Ok(())
    }
}

impl FromStr for FileItem {
    type Err = String;

    /// `PATH[;Name=Value...]` 形式をパースする
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';');
        let path = parts.next().unwrap_or_default().trim();
        if path.is_empty() {
            return Err(format!("empty path in item '{}'", s));
        }

        let mut item = FileItem::new(path);
        for part in parts {
            if part.trim().is_empty() {
                continue;
            }
            let (name, value) = part
                .split_once('=')
                .ok_or_else(|| format!("metadata '{}' is not in Name=Value form", part))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("metadata '{}' has an empty name", part));
            }
            item.metadata.insert(name.to_string(), value.trim().to_string());
        }

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_unix_path() {
        let item = FileItem::new("dist/assets/app.js");
        assert_eq!(item.file_name().unwrap(), "app.js");
    }

    #[test]
    fn test_file_name_windows_path() {
        let item = FileItem::new(r"bin\Release\package.zip");
        assert_eq!(item.file_name().unwrap(), "package.zip");
    }

    #[test]
    fn test_file_name_bare() {
        let item = FileItem::new("a.txt");
        assert_eq!(item.file_name().unwrap(), "a.txt");
    }

    #[test]
    fn test_file_name_trailing_separator() {
        let item = FileItem::new("dist/");
        assert_eq!(
            item.file_name(),
            Err(CopyError::MissingFileName("dist/".to_string()))
        );
    }

    #[test]
    fn test_content_type_absent() {
        let item = FileItem::new("a.txt");
        assert_eq!(item.content_type(), None);
    }

    #[test]
    fn test_content_type_empty_is_absent() {
        let item = FileItem::new("a.txt").with_metadata("ContentType", "");
        assert_eq!(item.content_type(), None);
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let item = FileItem::new("a.txt").with_metadata("contentType", "text/plain");
        assert_eq!(item.content_type(), Some("text/plain"));
    }

    #[test]
    fn test_parse_path_only() {
        let item: FileItem = "out/a.txt".parse().unwrap();
        assert_eq!(item, FileItem::new("out/a.txt"));
    }

    #[test]
    fn test_parse_with_metadata() {
        let item: FileItem = "site.css;ContentType=text/css;Tier=hot".parse().unwrap();
        assert_eq!(item.path, "site.css");
        assert_eq!(item.metadata("ContentType"), Some("text/css"));
        assert_eq!(item.metadata("Tier"), Some("hot"));
    }

    #[test]
    fn test_parse_trailing_semicolon() {
        let item: FileItem = "a.txt;".parse().unwrap();
        assert!(item.metadata.is_empty());
    }

    #[test]
    fn test_parse_invalid_metadata() {
        assert!("a.txt;ContentType".parse::<FileItem>().is_err());
        assert!("a.txt;=text/plain".parse::<FileItem>().is_err());
        assert!(";ContentType=text/plain".parse::<FileItem>().is_err());
    }

    #[test]
    fn test_display() {
        let item = FileItem::new("site.css").with_metadata("ContentType", "text/css");
        assert_eq!(item.to_string(), "site.css;ContentType=text/css");
    }

    #[test]
    fn test_deserialize_without_metadata() {
        let item: FileItem = serde_json::from_str(r#"{"path":"a.txt"}"#).unwrap();
        assert_eq!(item, FileItem::new("a.txt"));
    }
}
