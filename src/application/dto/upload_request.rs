//! # Upload Request DTO
//!
//! アップロード要求のData Transfer Object

use crate::domain::entities::file_item::FileItem;
use crate::domain::entities::upload_plan::UploadPlan;
use crate::domain::errors::CopyError;
use crate::domain::services::upload_planner::UploadPlanner;

/// アップロード要求
///
/// タスクのパラメータ（ContainerName, Endpoint, SourceFiles, DestinationFiles,
/// StorageAccountKey, StorageAccountName）をまとめたもの
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// コンテナ名
    pub container_name: String,
    /// Blobサービスのエンドポイント URI
    pub endpoint: String,
    /// ストレージアカウント名
    pub storage_account_name: String,
    /// ストレージアカウントキー
    pub storage_account_key: String,
    /// ソースファイル
    pub source_files: Vec<FileItem>,
    /// 宛先（ソースとインデックスで対応）
    pub destination_files: Option<Vec<FileItem>>,
}

impl UploadRequest {
    /// 必須パラメータと宛先リストの長さを検証します。
    ///
    /// # 例
    ///
    /// ```
    /// use blobcopy::application::dto::upload_request::UploadRequest;
    /// use blobcopy::domain::entities::file_item::FileItem;
    ///
    /// let request = UploadRequest {
    ///     container_name: "releases".to_string(),
    ///     endpoint: "https://myaccount.blob.core.windows.net".to_string(),
    ///     storage_account_name: "myaccount".to_string(),
    ///     storage_account_key: "c2VjcmV0".to_string(),
    ///     source_files: vec![FileItem::new("out/app.zip")],
    ///     destination_files: None,
    /// };
    /// assert!(request.validate().is_ok());
    ///
    /// // 宛先の数がソースと一致しない
    /// let mismatched = UploadRequest {
    ///     destination_files: Some(vec![]),
    ///     ..request
    /// };
    /// assert!(mismatched.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CopyError> {
        let required = [
            ("ContainerName", &self.container_name),
            ("Endpoint", &self.endpoint),
            ("StorageAccountName", &self.storage_account_name),
            ("StorageAccountKey", &self.storage_account_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CopyError::MissingParameter(name));
            }
        }

        if let Some(destinations) = &self.destination_files {
            if destinations.len() != self.source_files.len() {
                return Err(CopyError::DestinationCountMismatch {
                    sources: self.source_files.len(),
                    destinations: destinations.len(),
                });
            }
        }

        Ok(())
    }

    /// ファイルごとの計画を作成
    pub fn plan(&self) -> Result<UploadPlan, CopyError> {
        UploadPlanner::plan(&self.source_files, self.destination_files.as_deref())
    }

    /// ログ出力用にマスクしたアカウントキー
    pub fn masked_account_key(&self) -> String {
        mask_secret(&self.storage_account_key)
    }
}

/// 先頭4文字以外を伏せる
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "*".repeat(secret.chars().count())
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_request() -> UploadRequest {
        UploadRequest {
            container_name: "artifacts".to_string(),
            endpoint: "http://127.0.0.1:10000/devstoreaccount1".to_string(),
            storage_account_name: "devstoreaccount1".to_string(),
            storage_account_key: "Eby8vdM02xNOcqFl".to_string(),
            source_files: vec![FileItem::new("a.txt"), FileItem::new("b.txt")],
            destination_files: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(create_test_request().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_container() {
        let request = UploadRequest {
            container_name: "  ".to_string(),
            ..create_test_request()
        };
        assert_eq!(
            request.validate(),
            Err(CopyError::MissingParameter("ContainerName"))
        );
    }

    #[test]
    fn test_validate_missing_key() {
        let request = UploadRequest {
            storage_account_key: String::new(),
            ..create_test_request()
        };
        assert_eq!(
            request.validate(),
            Err(CopyError::MissingParameter("StorageAccountKey"))
        );
    }

    #[test]
    fn test_validate_destination_mismatch() {
        let request = UploadRequest {
            destination_files: Some(vec![FileItem::new("x.txt")]),
            ..create_test_request()
        };
        assert_eq!(
            request.validate(),
            Err(CopyError::DestinationCountMismatch {
                sources: 2,
                destinations: 1
            })
        );
    }

    #[test]
    fn test_validate_zero_sources() {
        let request = UploadRequest {
            source_files: vec![],
            ..create_test_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_plan_from_request() {
        let plan = create_test_request().plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.entries()[1].destination, "b.txt");
    }

    #[test]
    fn test_masked_account_key() {
        assert_eq!(create_test_request().masked_account_key(), "Eby8****");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }
}
