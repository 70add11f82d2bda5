//! Queue - QueueStore 上の読み込み→変更→保存ヘルパー
//!
//! 呼び出し元をまたいでこのサイクル全体を直列化するものはありません。
//! push 同士、または push とワーカーの pop が競合すると、片方の更新が失われることがあります。

use crate::domain::Task;
use crate::ports::{QueueStore, StoreError};

/// Append `task` at the tail of the queue.
pub async fn push(store: &dyn QueueStore, task: Task) -> Result<(), StoreError> {
    let mut tasks = store.load().await;
    tasks.push(task);
    store.save(&tasks).await
}

/// Remove the tail of the queue (the most recently pushed task).
///
/// The shortened queue is saved before the task is returned; when the save
/// fails the task stays queued and the error is returned instead.
pub async fn pop(store: &dyn QueueStore) -> Result<Option<Task>, StoreError> {
    let mut tasks = store.load().await;
    let Some(task) = tasks.pop() else {
        return Ok(None);
    };
    store.save(&tasks).await?;
    Ok(Some(task))
}
