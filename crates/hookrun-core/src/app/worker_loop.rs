//! WorkerLoop - タスク実行ループ（単一ワーカー）
//!
//! # フロー
//! 1. `queue::pop()` で末尾のタスクを取り出す（短くなったキューは実行前に保存済み）
//! 2. TaskExecutor で実行 → 成否
//! 3. ResultReporter で結果メッセージを報告
//! 4. キューが空なら `poll_interval` だけ眠って 1 に戻る
//!
//! # 順序
//! 末尾から取り出すので、A → B → C の順に積むと C → B → A の順に実行されます。
//!
//! # 停止
//! - `watch` の値が true になるか、Sender が drop されたら止まる
//! - アイドル中の sleep は即座に打ち切る
//! - 実行中のタスクは最後まで走らせる（子プロセスは止めない）
//!
//! 実行にタイムアウトはありません。止まらないコマンドはループ全体を止めます。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::queue;
use crate::domain::TaskOutcome;
use crate::ports::{QueueStore, ResultReporter, StoreError, TaskExecutor};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct WorkerLoop {
    store: Arc<dyn QueueStore>,
    executor: Arc<dyn TaskExecutor>,
    reporter: Arc<dyn ResultReporter>,
    poll_interval: Duration,
}

impl WorkerLoop {
    pub fn new(
        store: Arc<dyn QueueStore>,
        executor: Arc<dyn TaskExecutor>,
        reporter: Arc<dyn ResultReporter>,
    ) -> Self {
        Self {
            store,
            executor,
            reporter,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// One Idle → Busy → Idle step.
    ///
    /// Returns `Ok(None)` when the queue was empty.
    pub async fn run_once(&self) -> Result<Option<TaskOutcome>, StoreError> {
        let Some(task) = queue::pop(self.store.as_ref()).await? else {
            return Ok(None);
        };

        let log_id = task.log_id();
        let success = self.executor.execute(task.command(), log_id).await;
        let outcome = TaskOutcome::new(log_id, success);

        self.reporter
            .report(task.callback_target(), &outcome.message())
            .await;
        Ok(Some(outcome))
    }

    /// Runs until `shutdown_rx` turns true or its sender is dropped.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        tracing::info!(poll_interval = ?self.poll_interval, "worker loop started");
        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            match self.run_once().await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "failed to save queue after pop"),
            }

            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
        tracing::info!("worker loop stopped");
    }
}

/// A spawned [`WorkerLoop`].
/// - `request_shutdown()` 以降、新しいタスクは取らない
/// - `shutdown_and_join()` で実行中のタスクの終了まで待てる
pub struct WorkerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn spawn(worker: WorkerLoop) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(async move {
            worker.run(shutdown_rx).await;
        });
        Self { shutdown_tx, join }
    }

    pub fn request_shutdown(&self) {
        // receiver may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "worker task ended abnormally");
        }
    }
}
