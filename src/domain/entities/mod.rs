//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **FileItem**: ファイル記述子（パスとメタデータ）
//! - **UploadPlan**: ファイルごとのアップロード計画

pub mod file_item;
pub mod upload_plan;
