//! Console Task Logger
//!
//! TaskLoggerのコンソール実装

use log::{debug, info};

use crate::domain::repositories::task_logger::TaskLogger;

/// コンソールへ出力するタスクロガー
///
/// 情報メッセージは `✓` 付きで標準出力に表示し、同時に `log` にも流す。
/// 詳細メッセージは `log` の debug レベルのみ
#[derive(Debug, Clone, Default)]
pub struct ConsoleTaskLogger {
    quiet: bool,
}

impl ConsoleTaskLogger {
    /// 新しいロガーを作成
    ///
    /// # Arguments
    ///
    /// * `quiet` - `true` の場合は標準出力に表示しない
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// 標準出力に表示する行
    pub fn format_line(message: &str) -> String {
        format!("✓ {}", message)
    }

    /// 標準出力に表示する行（quietの場合は `None`）
    pub fn console_line(&self, message: &str) -> Option<String> {
        (!self.quiet).then(|| Self::format_line(message))
    }
}

impl TaskLogger for ConsoleTaskLogger {
    fn log_message(&self, message: &str) {
        info!("{}", message);
        if let Some(line) = self.console_line(message) {
            println!("{}", line);
        }
    }

    fn log_detail(&self, message: &str) {
        debug!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(
            ConsoleTaskLogger::format_line("Created container: 'releases'"),
            "✓ Created container: 'releases'"
        );
    }

    #[test]
    fn test_console_line_respects_quiet() {
        let message = "Deleted file: 'a.txt', from cloud storage";

        assert_eq!(ConsoleTaskLogger::new(true).console_line(message), None);
        assert_eq!(
            ConsoleTaskLogger::new(false).console_line(message),
            Some("✓ Deleted file: 'a.txt', from cloud storage".to_string())
        );
        assert_eq!(ConsoleTaskLogger::default().console_line("x"), Some("✓ x".to_string()));
    }
}
