//! Errors - ドメイン層のエラー型
//!
//! タスク単位の失敗（コマンド失敗、報告失敗）はエラーとして伝播させません。
//! 永続化・設定・構築のエラーはそれぞれ `StoreError` / `ConfigError` / `BuildError` にあります。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookrunError {
    #[error("invalid log id: {0:?}")]
    InvalidLogId(String),
}
