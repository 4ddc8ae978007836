//! Azure Blob Storage Client
//!
//! ストレージ能力のAzure実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use azure_storage::prelude::StorageCredentials;
use azure_storage::CloudLocation;
use azure_storage_blobs::prelude::{
    BlobBlockType, BlobClient as SdkBlobClient, BlobServiceClient, BlockList, ClientBuilder,
    ContainerClient,
};
use log::{debug, info};
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::errors::{describe_error, is_container_already_exists, is_not_found};
use crate::domain::repositories::blob_storage::{
    BlobClient, BlobClientFactory, BlobContainer, BlobHandle,
};

/// Block size for block blob uploads (4 MiB)
/// Streams that fit in one block are sent with a single Put Blob request
pub const BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Validate the endpoint and normalize it to a base URI without trailing slash
pub fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let url = azure_core::Url::parse(endpoint.trim())
        .with_context(|| format!("Invalid storage endpoint URI: '{}'", endpoint))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => anyhow::bail!(
            "Invalid storage endpoint URI: '{}' (unsupported scheme '{}')",
            endpoint,
            scheme
        ),
    }
    if url.host_str().is_none() {
        anyhow::bail!("Invalid storage endpoint URI: '{}' (missing host)", endpoint);
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Format a block ID; all IDs of a blob must have the same length
pub fn block_id(index: usize) -> String {
    azure_core::base64::encode(format!("{:08}", index).into_bytes())
}

/// Production implementation of BlobClientFactory (account key credentials)
#[derive(Debug, Default, Clone)]
pub struct AzureBlobClientFactory;

impl AzureBlobClientFactory {
    pub fn new() -> Self {
        Self
    }
}

impl BlobClientFactory for AzureBlobClientFactory {
    fn create_client(
        &self,
        endpoint: &str,
        account_name: &str,
        account_key: &str,
    ) -> Result<Box<dyn BlobClient>> {
        let uri = normalize_endpoint(endpoint)?;

        let credentials =
            StorageCredentials::access_key(account_name.to_string(), account_key.to_string());
        let location = CloudLocation::Custom {
            account: account_name.to_string(),
            uri: uri.clone(),
        };
        let service = ClientBuilder::with_location(location, credentials).blob_service_client();

        info!("Created Azure blob client for {} at {}", account_name, uri);

        Ok(Box::new(AzureBlobClient {
            account_name: account_name.to_string(),
            service,
        }))
    }
}

/// Azure storage account client
pub struct AzureBlobClient {
    account_name: String,
    service: BlobServiceClient,
}

impl fmt::Debug for AzureBlobClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureBlobClient")
            .field("account_name", &self.account_name)
            .finish()
    }
}

impl BlobClient for AzureBlobClient {
    fn container(&self, name: &str) -> Box<dyn BlobContainer> {
        Box::new(AzureContainer {
            name: name.to_string(),
            client: self.service.container_client(name.to_string()),
        })
    }
}

/// Azure blob container
pub struct AzureContainer {
    name: String,
    client: ContainerClient,
}

#[async_trait]
impl BlobContainer for AzureContainer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_if_not_exists(&self) -> Result<bool> {
        debug!("Creating container if not exists: {}", self.name);

        match self.client.create().await {
            Ok(_) => Ok(true),
            Err(e) if is_container_already_exists(&e) => {
                debug!("Container {} already exists", self.name);
                Ok(false)
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to create container {}: {}",
                self.name,
                describe_error(e)
            )),
        }
    }

    fn blob(&self, name: &str) -> Box<dyn BlobHandle> {
        Box::new(AzureBlob {
            name: name.to_string(),
            client: self.client.blob_client(name.to_string()),
        })
    }
}

/// Azure blob
pub struct AzureBlob {
    name: String,
    client: SdkBlobClient,
}

impl AzureBlob {
    /// Upload a stream larger than one block as a block list
    async fn put_blocks(
        &self,
        first: Vec<u8>,
        stream: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64> {
        let mut block_ids = Vec::new();
        let mut total = 0u64;
        let mut chunk = first;

        while !chunk.is_empty() {
            let id = block_id(block_ids.len());
            total += chunk.len() as u64;

            debug!(
                "Uploading block {} ({} bytes) of {}",
                block_ids.len() + 1,
                chunk.len(),
                self.name
            );

            self.client
                .put_block(id.clone(), chunk)
                .await
                .map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to upload block {} of {}: {}",
                        block_ids.len() + 1,
                        self.name,
                        describe_error(e)
                    )
                })?;
            block_ids.push(id);

            chunk = read_chunk(stream, BLOCK_SIZE).await?;
        }

        let block_list = BlockList {
            blocks: block_ids
                .into_iter()
                .map(|id| BlobBlockType::new_uncommitted(id))
                .collect(),
        };
        let block_count = block_list.blocks.len();

        self.client.put_block_list(block_list).await.map_err(|e| {
            anyhow::anyhow!(
                "Failed to commit {} blocks of {}: {}",
                block_count,
                self.name,
                describe_error(e)
            )
        })?;

        Ok(total)
    }
}

#[async_trait]
impl BlobHandle for AzureBlob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn delete_if_exists(&self) -> Result<bool> {
        match self.client.delete().await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => {
                debug!("Blob {} doesn't exist, nothing to delete", self.name);
                Ok(false)
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to delete blob {}: {}",
                self.name,
                describe_error(e)
            )),
        }
    }

    async fn upload_from_stream(&self, stream: &mut (dyn AsyncRead + Send + Unpin)) -> Result<u64> {
        let first = read_chunk(stream, BLOCK_SIZE).await?;

        if first.len() < BLOCK_SIZE {
            let size = first.len() as u64;
            debug!("Uploading {} ({} bytes) in a single request", self.name, size);

            self.client.put_block_blob(first).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to upload blob {}: {}",
                    self.name,
                    describe_error(e)
                )
            })?;
            return Ok(size);
        }

        self.put_blocks(first, stream).await
    }
}

/// Read up to `limit` bytes; a short result means the stream is exhausted
async fn read_chunk(stream: &mut (dyn AsyncRead + Send + Unpin), limit: usize) -> Result<Vec<u8>> {
    let mut chunk = Vec::new();
    (&mut *stream)
        .take(limit as u64)
        .read_to_end(&mut chunk)
        .await
        .context("Failed to read source stream")?;
    Ok(chunk)
}
