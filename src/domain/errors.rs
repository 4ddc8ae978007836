//! # Domain Errors
//!
//! アップロード要求の検証エラー

use thiserror::Error;

/// 検証エラー
///
/// ストレージへの呼び出しを行う前に検出されるエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// 必須パラメータが空または未指定
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// 宛先リストの長さがソースリストと一致しない
    #[error("DestinationFiles has {destinations} item(s) but SourceFiles has {sources}")]
    DestinationCountMismatch { sources: usize, destinations: usize },

    /// パスからファイル名を取り出せない
    #[error("cannot derive a blob name from source path '{0}'")]
    MissingFileName(String),
}
