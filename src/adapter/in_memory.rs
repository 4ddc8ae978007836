//! In-Memory Blob Storage
//!
//! Blobストレージのメモリ実装（テストとdry-run検証用）
//!
//! すべての呼び出しを `StorageCall` として記録する

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::domain::repositories::blob_storage::{
    BlobClient, BlobClientFactory, BlobContainer, BlobHandle,
};

/// 記録されたストレージ呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    CreateContainer {
        container: String,
        created: bool,
    },
    DeleteBlob {
        container: String,
        blob: String,
        deleted: bool,
    },
    Upload {
        container: String,
        blob: String,
        bytes: u64,
    },
}

impl StorageCall {
    /// 呼び出し対象のBlob名
    pub fn blob(&self) -> Option<&str> {
        match self {
            StorageCall::CreateContainer { .. } => None,
            StorageCall::DeleteBlob { blob, .. } | StorageCall::Upload { blob, .. } => {
                Some(blob.as_str())
            }
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    containers: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    calls: Vec<StorageCall>,
    failing_uploads: HashSet<String>,
    clients_created: usize,
}

/// メモリ上のBlobストア
///
/// クローンは同じ状態を共有する
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // ポイズンされても記録は読める
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Blobを直接配置する（コンテナも作成される）
    pub fn insert_blob(&self, container: &str, blob: &str, content: Vec<u8>) {
        self.lock()
            .containers
            .entry(container.to_string())
            .or_default()
            .insert(blob.to_string(), content);
    }

    /// Blobの内容を取得
    pub fn blob(&self, container: &str, blob: &str) -> Option<Vec<u8>> {
        self.lock()
            .containers
            .get(container)
            .and_then(|blobs| blobs.get(blob))
            .cloned()
    }

    /// コンテナ内のBlob名一覧
    pub fn blob_names(&self, container: &str) -> Vec<String> {
        self.lock()
            .containers
            .get(container)
            .map(|blobs| blobs.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// コンテナが存在するかどうか
    pub fn has_container(&self, container: &str) -> bool {
        self.lock().containers.contains_key(container)
    }

    /// 指定したBlobへのアップロードを失敗させる
    pub fn fail_uploads_to(&self, blob: &str) {
        self.lock().failing_uploads.insert(blob.to_string());
    }

    /// 記録された呼び出し
    pub fn calls(&self) -> Vec<StorageCall> {
        self.lock().calls.clone()
    }

    /// create-if-not-exists の呼び出し回数
    pub fn create_container_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StorageCall::CreateContainer { .. }))
            .count()
    }

    /// ファクトリ経由で作成されたクライアント数
    pub fn clients_created(&self) -> usize {
        self.lock().clients_created
    }
}

impl BlobClientFactory for InMemoryBlobStore {
    fn create_client(
        &self,
        endpoint: &str,
        account_name: &str,
        _account_key: &str,
    ) -> Result<Box<dyn BlobClient>> {
        log::debug!(
            "Creating in-memory blob client for {} ({})",
            account_name,
            endpoint
        );
        self.lock().clients_created += 1;
        Ok(Box::new(self.clone()))
    }
}

impl BlobClient for InMemoryBlobStore {
    fn container(&self, name: &str) -> Box<dyn BlobContainer> {
        Box::new(InMemoryContainer {
            store: self.clone(),
            name: name.to_string(),
        })
    }
}

struct InMemoryContainer {
    store: InMemoryBlobStore,
    name: String,
}

#[async_trait]
impl BlobContainer for InMemoryContainer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_if_not_exists(&self) -> Result<bool> {
        let mut state = self.store.lock();
        let created = !state.containers.contains_key(&self.name);
        if created {
            state.containers.insert(self.name.clone(), BTreeMap::new());
        }
        state.calls.push(StorageCall::CreateContainer {
            container: self.name.clone(),
            created,
        });
        Ok(created)
    }

    fn blob(&self, name: &str) -> Box<dyn BlobHandle> {
        Box::new(InMemoryBlob {
            store: self.store.clone(),
            container: self.name.clone(),
            name: name.to_string(),
        })
    }
}

struct InMemoryBlob {
    store: InMemoryBlobStore,
    container: String,
    name: String,
}

#[async_trait]
impl BlobHandle for InMemoryBlob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn delete_if_exists(&self) -> Result<bool> {
        let mut state = self.store.lock();
        let deleted = state
            .containers
            .get_mut(&self.container)
            .map(|blobs| blobs.remove(&self.name).is_some())
            .unwrap_or(false);
        state.calls.push(StorageCall::DeleteBlob {
            container: self.container.clone(),
            blob: self.name.clone(),
            deleted,
        });
        Ok(deleted)
    }

    async fn upload_from_stream(&self, stream: &mut (dyn AsyncRead + Send + Unpin)) -> Result<u64> {
        if self.store.lock().failing_uploads.contains(&self.name) {
            anyhow::bail!("upload to '{}' rejected by in-memory store", self.name);
        }

        let mut content = Vec::new();
        stream
            .read_to_end(&mut content)
            .await
            .context("Failed to read upload stream")?;
        let bytes = content.len() as u64;

        let mut state = self.store.lock();
        let blobs = state
            .containers
            .get_mut(&self.container)
            .with_context(|| format!("container not found: {}", self.container))?;
        blobs.insert(self.name.clone(), content);
        state.calls.push(StorageCall::Upload {
            container: self.container.clone(),
            blob: self.name.clone(),
            bytes,
        });

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_if_not_exists_only_first_time() {
        let store = InMemoryBlobStore::new();
        let container = store.container("releases");

        assert!(container.create_if_not_exists().await.unwrap());
        assert!(!container.create_if_not_exists().await.unwrap());
        assert_eq!(store.create_container_count(), 2);
        assert!(store.has_container("releases"));
    }

    #[tokio::test]
    async fn test_delete_if_exists() {
        let store = InMemoryBlobStore::new();
        store.insert_blob("releases", "app.zip", b"zip".to_vec());
        let blob = store.container("releases").blob("app.zip");

        assert!(blob.delete_if_exists().await.unwrap());
        assert!(!blob.delete_if_exists().await.unwrap());
        assert_eq!(store.blob("releases", "app.zip"), None);
    }

    #[tokio::test]
    async fn test_upload_requires_container() {
        let store = InMemoryBlobStore::new();
        let blob = store.container("missing").blob("a.txt");
        let mut stream: &[u8] = b"abc";

        assert!(blob.upload_from_stream(&mut stream).await.is_err());
    }

    #[tokio::test]
    async fn test_upload_overwrites() {
        let store = InMemoryBlobStore::new();
        store.insert_blob("releases", "a.txt", b"old".to_vec());
        let blob = store.container("releases").blob("a.txt");
        let mut stream: &[u8] = b"new!";

        let bytes = blob.upload_from_stream(&mut stream).await.unwrap();

        assert_eq!(bytes, 4);
        assert_eq!(store.blob("releases", "a.txt"), Some(b"new!".to_vec()));
        assert_eq!(store.blob_names("releases"), vec!["a.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_upload() {
        let store = InMemoryBlobStore::new();
        store.insert_blob("releases", "keep.txt", b"keep".to_vec());
        store.fail_uploads_to("a.txt");
        let blob = store.container("releases").blob("a.txt");
        let mut stream: &[u8] = b"abc";

        assert!(blob.upload_from_stream(&mut stream).await.is_err());
        assert_eq!(store.blob("releases", "a.txt"), None);
    }

    #[test]
    fn test_factory_shares_state() {
        let store = InMemoryBlobStore::new();
        let _client = store
            .create_client("http://localhost", "account", "key")
            .unwrap();
        assert_eq!(store.clients_created(), 1);
    }
}
