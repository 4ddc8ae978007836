//! Azure Adapter Modules
//!
//! Azure Blob Storage 統合のためのアダプターモジュール

pub mod client;
pub mod errors;

pub use client::AzureBlobClientFactory;
