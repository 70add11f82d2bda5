//! hookrun-core
//!
//! Webhook で受けた pull request イベントをシェルコマンドに変換し、
//! 永続キュー経由で 1 本のワーカーが直列に実行して、結果を報告します。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（LogId, Task, TaskOutcome, WebhookEvent, errors）
//! - **ports**: 抽象化レイヤー（QueueStore, TaskExecutor, ResultReporter, IdGenerator, Clock）
//! - **impls**: 実装（FileQueueStore, InMemoryQueueStore, ShellExecutor, HttpReporter）
//! - **app**: アプリケーションロジック（builder, translator, worker_loop, server）
//! - **config**: 環境変数からの設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_utils;
