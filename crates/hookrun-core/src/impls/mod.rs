//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FileQueueStore**: JSON スナップショット（本番用）
//! - **InMemoryQueueStore**: テスト・組み込み用
//! - **ShellExecutor**: 子プロセス実行 + ログファイル
//! - **HttpReporter**: コメント API への POST

pub mod file_store;
pub mod fsync;
pub mod http_reporter;
pub mod memory_store;
pub mod shell_executor;

pub use self::file_store::FileQueueStore;
pub use self::http_reporter::{HttpReporter, ReportError};
pub use self::memory_store::InMemoryQueueStore;
pub use self::shell_executor::ShellExecutor;
