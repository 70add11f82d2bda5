//! TaskOutcome - 1 タスクの実行結果
//!
//! 永続化しません。ワーカーが reporter に渡したら捨てます。
//! 後に残るのは `log_id` のログファイルだけです。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LogId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub log_id: LogId,
    pub success: bool,
}

impl TaskOutcome {
    pub fn new(log_id: LogId, success: bool) -> Self {
        Self { log_id, success }
    }

    /// Human-readable line delivered through the reporter.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "success" } else { "error" };
        write!(f, "Task {} completed with {}.", self.log_id, status)
    }
}
