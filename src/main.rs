//! Blobcopy - Azure Blob Storage Uploader
//!
//! ローカルファイルをBlobコンテナへアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use blobcopy::adapter::config::Config;
use blobcopy::driver::{Args, CopyToStorageWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (optional)
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Create workflow with injected dependencies
    let workflow = CopyToStorageWorkflow::new(config);

    workflow.execute(args).await
}
