//! TaskExecutor port - 1 タスクのコマンドを最後まで実行する
//!
//! # 契約
//! - 標準出力と標準エラーを `log_id` で名前付けされたログ成果物にまとめて書く
//! - プロセス終了まで戻らない（タイムアウトなし）
//! - 終了コード 0 のときだけ `true`。起動失敗も `false`
//! - 戻る時点でログはディスクに flush 済み

use async_trait::async_trait;

use crate::domain::LogId;

#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, command: &str, log_id: LogId) -> bool;
}
