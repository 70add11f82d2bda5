use serde::{Deserialize, Serialize};
use std::fmt;

use super::LogId;

/// Opaque address a task outcome is reported to (a pull request's `comments_url`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackTarget(String);

impl CallbackTarget {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One deferred command execution.
///
/// The queue snapshot stores a task as a 3-tuple
/// `[command, log_id, callback_target | null]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskTuple", into = "TaskTuple")]
pub struct Task {
    command: String,
    log_id: LogId,
    callback_target: Option<CallbackTarget>,
}

type TaskTuple = (String, LogId, Option<CallbackTarget>);

impl From<TaskTuple> for Task {
    fn from((command, log_id, callback_target): TaskTuple) -> Self {
        Self {
            command,
            log_id,
            callback_target,
        }
    }
}

impl From<Task> for TaskTuple {
    fn from(task: Task) -> Self {
        (task.command, task.log_id, task.callback_target)
    }
}

impl Task {
    pub fn new(
        command: impl Into<String>,
        log_id: LogId,
        callback_target: Option<CallbackTarget>,
    ) -> Self {
        Self {
            command: command.into(),
            log_id,
            callback_target,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn log_id(&self) -> LogId {
        self.log_id
    }

    pub fn callback_target(&self) -> Option<&CallbackTarget> {
        self.callback_target.as_ref()
    }
}
