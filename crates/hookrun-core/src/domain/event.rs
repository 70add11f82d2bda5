//! WebhookEvent - 受信する pull request イベント
//!
//! 翻訳に使うフィールドだけをモデル化しています。
//! 一部が欠けた payload でも読めるよう、すべて Option です。
//! 欠けたフィールドの扱いは translator が決めます。

use serde::{Deserialize, Serialize};

/// Action carried by a pull request webhook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrAction {
    Opened,
    Synchronize,
    Edited,
    Closed,
    /// Any action the translator ignores (labeled, reopened, ...).
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub action: Option<PrAction>,

    #[serde(default)]
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub merged: Option<bool>,

    #[serde(default)]
    pub comments_url: Option<String>,

    #[serde(default)]
    pub base: Option<BranchRef>,

    #[serde(default)]
    pub head: Option<BranchRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}

impl WebhookEvent {
    /// Lenient parse: anything that does not fit the event shape becomes an
    /// empty event, which translates to "nothing queued".
    pub fn from_value(payload: &serde_json::Value) -> Self {
        match serde_json::from_value(payload.clone()) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed webhook payload");
                Self::default()
            }
        }
    }
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged.unwrap_or(false)
    }

    pub fn base_ref(&self) -> Option<&str> {
        self.base.as_ref().map(|b| b.name.as_str())
    }

    pub fn head_ref(&self) -> Option<&str> {
        self.head.as_ref().map(|b| b.name.as_str())
    }
}
