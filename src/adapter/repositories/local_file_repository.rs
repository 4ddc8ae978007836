//! Local File Repository Implementation
//!
//! FileRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::BufReader;

use crate::domain::repositories::file_repository::{FileRepository, FileStream};

/// ファイルシステムベースのファイルリポジトリ
pub struct LocalFileRepository;

impl LocalFileRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// `~` を展開したパスを返す
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    }
}

#[async_trait]
impl FileRepository for LocalFileRepository {
    async fn open_read(&self, path: &str) -> Result<FileStream> {
        let expanded = Self::expand_path(path);
        let file = File::open(&expanded)
            .await
            .with_context(|| format!("Failed to open source file: {}", expanded.display()))?;

        debug!("Opened {} for upload", expanded.display());
        Ok(Box::new(BufReader::new(file)))
    }
}

impl Default for LocalFileRepository {
    fn default() -> Self {
        Self::new()
    }
}
