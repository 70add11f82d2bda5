//! QueueStore port - 待ちタスク列の正本（source of truth）
//!
//! QueueStore はスナップショット全体の load / save だけを提供します。
//! append / pop のようなプリミティブはこの層にはありません。
//! 読み込み→変更→保存は呼び出し側（`app::queue`）で行います。
//!
//! # 契約
//! - `load()` はスナップショットが無い、または壊れている場合に空列を返す（失敗しない）
//! - `save()` はスナップショット全体をアトミックに置き換える
//!   （途中でクラッシュしても、読み手が見るのは旧版か新版のどちらか）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("blocking task failed: {0}")]
    Join(String),
}

/// Ordered list of pending tasks, persisted as one snapshot.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Current snapshot, oldest task first.
    async fn load(&self) -> Vec<Task>;

    /// Replace the whole snapshot.
    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}
