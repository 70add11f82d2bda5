//! EventTranslator - webhook イベントをタスクと受付メッセージに変換する
//!
//! | action                        | merged | 結果                                   |
//! |-------------------------------|--------|----------------------------------------|
//! | opened / synchronize / edited | -      | head ブランチのテストコマンドを積む     |
//! | closed                        | true   | デプロイコマンドを積む                 |
//! | closed                        | false  | 何もしない（空メッセージ）             |
//! | その他                        | -      | 何もしない（空メッセージ）             |
//!
//! 受付メッセージにはログ取得用の URL（`http://{host}/{log_id}`）が入ります。

use std::sync::Arc;

use super::queue;
use crate::domain::{CallbackTarget, LogId, PrAction, Task, WebhookEvent};
use crate::ports::{IdGenerator, QueueStore, ResultReporter};

pub const DEFAULT_TEST_COMMAND: &str = "echo {branch}";
pub const DEFAULT_DEPLOY_COMMAND: &str = "docker-compose up -d --build";

/// Commands queued for each kind of event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    /// `{branch}` is replaced by the pull request's head branch.
    pub test_command: String,
    pub deploy_command: String,
}

impl CommandSet {
    pub fn test_command_for(&self, branch: &str) -> String {
        self.test_command.replace("{branch}", branch)
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            test_command: DEFAULT_TEST_COMMAND.to_string(),
            deploy_command: DEFAULT_DEPLOY_COMMAND.to_string(),
        }
    }
}

/// Result of translating one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Ack sent back to the webhook caller; empty when nothing was queued.
    pub message: String,
    pub task: Option<Task>,
}

impl Translation {
    fn ignored() -> Self {
        Self {
            message: String::new(),
            task: None,
        }
    }
}

/// Address where the log of `log_id` can be fetched.
pub fn log_url(host: &str, log_id: LogId) -> String {
    format!("http://{host}/{log_id}")
}

/// Pure translation; `log_id` names the task if one is produced.
pub fn translate(
    event: &WebhookEvent,
    commands: &CommandSet,
    host: &str,
    log_id: LogId,
) -> Translation {
    let (Some(action), Some(pr)) = (&event.action, &event.pull_request) else {
        return Translation::ignored();
    };
    let callback = pr.comments_url.as_deref().map(CallbackTarget::new);
    let url = log_url(host, log_id);

    match action {
        PrAction::Opened | PrAction::Synchronize | PrAction::Edited => {
            let Some(head) = pr.head_ref() else {
                return Translation::ignored();
            };
            Translation {
                message: format!("Task was queued to test branch \"{head}\". {url}"),
                task: Some(Task::new(commands.test_command_for(head), log_id, callback)),
            }
        }
        PrAction::Closed if pr.is_merged() => {
            let (Some(base), Some(head)) = (pr.base_ref(), pr.head_ref()) else {
                return Translation::ignored();
            };
            Translation {
                message: format!(
                    "Task was queued to update branch \"{base}\" after merge with \"{head}\". {url}"
                ),
                task: Some(Task::new(commands.deploy_command.clone(), log_id, callback)),
            }
        }
        _ => Translation::ignored(),
    }
}

/// Ack sent instead of the queued message when the task could not be stored.
pub fn queue_failure_message(command: &str) -> String {
    format!("Failed to queue task \"{command}\".")
}

/// The acceptor path: translate, enqueue, acknowledge.
pub struct EventTranslator {
    store: Arc<dyn QueueStore>,
    ids: Arc<dyn IdGenerator>,
    reporter: Arc<dyn ResultReporter>,
    commands: CommandSet,
}

impl EventTranslator {
    pub fn new(
        store: Arc<dyn QueueStore>,
        ids: Arc<dyn IdGenerator>,
        reporter: Arc<dyn ResultReporter>,
        commands: CommandSet,
    ) -> Self {
        Self {
            store,
            ids,
            reporter,
            commands,
        }
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Handles one inbound payload and returns the ack message.
    ///
    /// The ack is also reported to the pull request's comments when a task
    /// was produced. If the task cannot be stored, a failure message replaces
    /// the ack in both places.
    pub async fn accept(&self, host: &str, payload: &serde_json::Value) -> String {
        let event = WebhookEvent::from_value(payload);
        let log_id = self.ids.generate_log_id();
        let Translation { message, task } = translate(&event, &self.commands, host, log_id);

        let Some(task) = task else {
            tracing::debug!(action = ?event.action, "event ignored");
            return message;
        };

        let callback = task.callback_target().cloned();
        let command = task.command().to_string();
        let message = match queue::push(self.store.as_ref(), task).await {
            Ok(()) => {
                tracing::info!(%log_id, %command, "task queued");
                message
            }
            Err(e) => {
                tracing::warn!(%log_id, %command, error = %e, "failed to queue task");
                queue_failure_message(&command)
            }
        };
        self.reporter.report(callback.as_ref(), &message).await;
        message
    }
}
