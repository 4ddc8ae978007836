//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **CopyToStorageUseCase**: コンテナの用意とファイルのアップロード

pub mod copy_to_storage;
