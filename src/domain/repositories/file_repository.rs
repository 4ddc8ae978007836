//! # File Repository Trait
//!
//! ローカルファイルへのアクセスを抽象化

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

#[cfg(test)]
use mockall::automock;

/// 読み取り用のバイトストリーム
///
/// ドロップ時にクローズされる
pub type FileStream = Box<dyn AsyncRead + Send + Unpin>;

/// ファイルリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// ファイルを読み取り用に開く
    ///
    /// # Arguments
    ///
    /// * `path` - ファイルのパス
    ///
    /// # Errors
    ///
    /// ファイルが存在しない、または読み取れない場合にエラーを返す
    async fn open_read(&self, path: &str) -> Result<FileStream>;
}
