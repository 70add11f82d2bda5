//! InMemoryQueueStore - テスト・組み込み用のキュー
//!
//! プロセス終了で内容は消えます。load / save の契約は FileQueueStore と同じです。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::Task;
use crate::ports::{QueueStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryQueueStore {
    tasks: Mutex<Vec<Task>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    async fn load(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        *self.tasks.lock().await = tasks.to_vec();
        Ok(())
    }
}
