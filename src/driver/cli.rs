//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::domain::entities::file_item::FileItem;

/// ファイルをAzure Blob Storageへアップロードするタスク
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "blobcopy")]
#[command(
    about = "Upload files to an Azure Blob Storage container, replacing existing blobs",
    long_about = None
)]
pub struct Args {
    /// Source files, `PATH[;Name=Value...]` (items with ContentType are skipped)
    pub sources: Vec<FileItem>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Container name
    #[arg(long)]
    pub container: Option<String>,

    /// Blob service endpoint URI
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Storage account name
    #[arg(long, env = "AZURE_STORAGE_ACCOUNT")]
    pub account_name: Option<String>,

    /// Storage account key
    #[arg(long, env = "AZURE_STORAGE_KEY", hide_env_values = true)]
    pub account_key: Option<String>,

    /// Destination blob names, index-aligned with the sources (repeatable)
    #[arg(short, long = "dest")]
    pub destinations: Vec<FileItem>,

    /// Dry run mode - print the plan without touching storage
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}
