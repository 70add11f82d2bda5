//! HttpReporter - 結果をコメントとして POST する
//!
//! - 本文は常に診断ログ（tracing）に出す
//! - 送り先があれば `{"body": text}` を Bearer トークン付きで POST
//! - 2xx 以外・接続エラーは warn を出して終わり（再送しない）

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::domain::CallbackTarget;
use crate::ports::ResultReporter;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

pub struct HttpReporter {
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpReporter {
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, token })
    }

    async fn deliver(&self, target: &CallbackTarget, text: &str) -> Result<(), ReportError> {
        let mut request = self
            .client
            .post(target.as_str())
            .json(&CommentBody { body: text });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ReportError::Status { status, body });
        }
        tracing::debug!(callback = %target, %status, response = %body, "report delivered");
        Ok(())
    }
}

#[async_trait]
impl ResultReporter for HttpReporter {
    async fn report(&self, target: Option<&CallbackTarget>, text: &str) {
        tracing::info!(callback = ?target.map(CallbackTarget::as_str), "{text}");

        let Some(target) = target else {
            return;
        };
        if let Err(e) = self.deliver(target, text).await {
            tracing::warn!(callback = %target, error = %e, "failed to deliver report");
        }
    }
}
