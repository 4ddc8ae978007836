//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! ## サービス
//!
//! - **UploadPlanner**: 宛先名の解決とスキップ判定

pub mod upload_planner;
