//! # Copy To Storage Use Case
//!
//! ファイルをBlobストレージへコピーするユースケース

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::dto::upload_request::UploadRequest;
use crate::domain::entities::upload_plan::PlannedAction;
use crate::domain::repositories::blob_storage::BlobClientFactory;
use crate::domain::repositories::file_repository::FileRepository;
use crate::domain::repositories::task_logger::TaskLogger;

/// コピー結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// コンテナを新しく作成したかどうか
    pub container_created: bool,
    /// アップロードしたファイル数
    pub uploaded: usize,
    /// 既存Blobを置き換えた数
    pub replaced: usize,
    /// Content-Type 指定によりスキップした数
    pub skipped: usize,
    /// アップロードした総バイト数
    pub bytes_uploaded: u64,
}

/// ストレージコピーユースケース
///
/// コンテナを用意し、ファイルごとに既存Blobを削除してからアップロードする。
/// 処理は1ファイルずつ順番に行い、リトライはしない
pub struct CopyToStorageUseCase<F, R, L>
where
    F: BlobClientFactory + ?Sized,
    R: FileRepository + ?Sized,
    L: TaskLogger + ?Sized,
{
    client_factory: Arc<F>,
    file_repository: Arc<R>,
    logger: Arc<L>,
}

impl<F, R, L> CopyToStorageUseCase<F, R, L>
where
    F: BlobClientFactory + ?Sized,
    R: FileRepository + ?Sized,
    L: TaskLogger + ?Sized,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `client_factory` - ストレージクライアントのファクトリ
    /// * `file_repository` - ローカルファイルのリポジトリ
    /// * `logger` - ログ出力先
    pub fn new(client_factory: Arc<F>, file_repository: Arc<R>, logger: Arc<L>) -> Self {
        Self {
            client_factory,
            file_repository,
            logger,
        }
    }

    /// ファイルをコンテナへコピーする
    ///
    /// # Arguments
    ///
    /// * `request` - アップロード要求
    ///
    /// # Returns
    ///
    /// コピー結果のサマリー
    ///
    /// # Errors
    ///
    /// 要求が不正な場合はストレージを呼ばずにエラーを返す。
    /// ストレージやファイルのエラーはそのまま呼び出し元へ返す
    pub async fn execute(&self, request: &UploadRequest) -> Result<CopySummary> {
        request.validate()?;
        let plan = request.plan()?;

        self.logger.log_message(&format!(
            "Creating cloud storage client with Endpoint: {}, StorageAccountKey: {}, StorageAccountName: {}",
            request.endpoint,
            request.masked_account_key(),
            request.storage_account_name
        ));

        let client = self.client_factory.create_client(
            &request.endpoint,
            &request.storage_account_name,
            &request.storage_account_key,
        )?;

        let container = client.container(&request.container_name);
        let mut summary = CopySummary::default();

        if container.create_if_not_exists().await? {
            self.logger
                .log_message(&format!("Created container: '{}'", request.container_name));
            summary.container_created = true;
        }

        for entry in plan {
            if let PlannedAction::Skip { content_type } = &entry.action {
                self.logger.log_detail(&format!(
                    "Skipping '{}' (ContentType: {})",
                    entry.source, content_type
                ));
                summary.skipped += 1;
                continue;
            }

            let blob = container.blob(&entry.destination);
            if blob.delete_if_exists().await? {
                self.logger.log_message(&format!(
                    "Deleted file: '{}', from cloud storage",
                    entry.destination
                ));
                summary.replaced += 1;
            }

            // ストリームはアップロードの成否にかかわらずこのブロックの終わりで閉じる
            let bytes = {
                let mut stream = self.file_repository.open_read(&entry.source).await?;
                blob.upload_from_stream(&mut *stream)
                    .await
                    .with_context(|| {
                        format!("Failed to upload '{}' to '{}'", entry.source, entry.destination)
                    })?
            };

            self.logger.log_detail(&format!(
                "Uploaded '{}' to '{}' ({} bytes)",
                entry.source, entry.destination, bytes
            ));
            summary.uploaded += 1;
            summary.bytes_uploaded += bytes;
        }

        Ok(summary)
    }
}
