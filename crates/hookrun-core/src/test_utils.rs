//! テスト用の ports 実装

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{CallbackTarget, LogId, Task};
use crate::ports::{QueueStore, ResultReporter, StoreError, TaskExecutor};

/// Records every command it is asked to run and answers with a fixed result.
pub struct RecordingExecutor {
    success: bool,
    runs: Mutex<Vec<(String, LogId)>>,
}

impl RecordingExecutor {
    pub fn new(success: bool) -> Self {
        Self {
            success,
            runs: Mutex::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.runs
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }
}

#[async_trait]
impl TaskExecutor for RecordingExecutor {
    async fn execute(&self, command: &str, log_id: LogId) -> bool {
        self.runs
            .lock()
            .unwrap()
            .push((command.to_string(), log_id));
        self.success
    }
}

/// Records `(target, text)` pairs.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(Option<String>, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(Option<String>, String)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultReporter for RecordingReporter {
    async fn report(&self, target: Option<&CallbackTarget>, text: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((target.map(|t| t.as_str().to_string()), text.to_string()));
    }
}

/// Loads fine, refuses every save.
pub struct FailingSaveStore {
    tasks: Vec<Task>,
}

impl FailingSaveStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl QueueStore for FailingSaveStore {
    async fn load(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    async fn save(&self, _tasks: &[Task]) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }
}
