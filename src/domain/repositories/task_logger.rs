//! # Task Logger Trait
//!
//! タスクのログ出力先を抽象化

#[cfg(test)]
use mockall::automock;

/// タスクロガー
///
/// ユースケースはグローバルなロガーではなく、注入されたこのtraitを通してログを出す
#[cfg_attr(test, automock)]
pub trait TaskLogger: Send + Sync {
    /// 情報メッセージを出力
    fn log_message(&self, message: &str);

    /// 詳細メッセージを出力（デフォルトでは何もしない）
    fn log_detail(&self, _message: &str) {}
}
