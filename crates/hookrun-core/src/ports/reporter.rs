//! ResultReporter port - 結果メッセージの送り先
//!
//! `report()` は失敗を返しません。送信エラーは実装側でログに残して握りつぶします。

use async_trait::async_trait;

use crate::domain::CallbackTarget;

#[async_trait]
pub trait ResultReporter: Send + Sync {
    /// Log `text`, and deliver it to `target` when one is given.
    async fn report(&self, target: Option<&CallbackTarget>, text: &str);
}
