//! # Blob Storage Traits
//!
//! クラウドBlobストレージを抽象化
//!
//! ワイヤプロトコル、認証、リトライはストレージクライアント側の責務であり、
//! ここではコンテナ作成・Blob削除・アップロードの能力だけを定義する

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

#[cfg(test)]
use mockall::automock;

/// ストレージクライアントのファクトリ
#[cfg_attr(test, automock)]
pub trait BlobClientFactory: Send + Sync {
    /// クライアントを作成
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Blobサービスのエンドポイント URI
    /// * `account_name` - ストレージアカウント名
    /// * `account_key` - ストレージアカウントキー
    ///
    /// # Errors
    ///
    /// エンドポイントが不正な場合や資格情報が使えない場合にエラーを返す
    fn create_client(
        &self,
        endpoint: &str,
        account_name: &str,
        account_key: &str,
    ) -> Result<Box<dyn BlobClient>>;
}

/// ストレージアカウントへのクライアント
pub trait BlobClient: Send + Sync {
    /// 名前でコンテナを参照する（存在確認はしない）
    fn container(&self, name: &str) -> Box<dyn BlobContainer>;
}

/// コンテナ
#[async_trait]
pub trait BlobContainer: Send + Sync {
    /// コンテナ名
    fn name(&self) -> &str;

    /// コンテナが存在しなければ作成する
    ///
    /// # Returns
    ///
    /// 新しく作成した場合に `true`
    async fn create_if_not_exists(&self) -> Result<bool>;

    /// 名前でBlobを参照する（存在確認はしない）
    fn blob(&self, name: &str) -> Box<dyn BlobHandle>;
}

/// コンテナ内のBlob
#[async_trait]
pub trait BlobHandle: Send + Sync {
    /// Blob名
    fn name(&self) -> &str;

    /// Blobが存在すれば削除する
    ///
    /// # Returns
    ///
    /// 削除した場合に `true`
    async fn delete_if_exists(&self) -> Result<bool>;

    /// ストリームの内容でBlobを上書きする
    ///
    /// # Returns
    ///
    /// アップロードしたバイト数
    async fn upload_from_stream(&self, stream: &mut (dyn AsyncRead + Send + Unpin)) -> Result<u64>;
}
