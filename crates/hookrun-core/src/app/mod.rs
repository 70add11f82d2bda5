//! App - アプリケーション層
//!
//! ports を組み合わせて、受付とワーカーのロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: Config からの構築とワイヤリング
//! - **EventTranslator**: webhook → タスク + 受付メッセージ
//! - **WorkerLoop**: pop → execute → report の単一ワーカーループ
//! - **server**: HTTP の受け口（webhook 受付、ログ配信）

pub mod builder;
pub mod queue;
pub mod server;
pub mod translator;
pub mod worker_loop;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::server::{AppState, build_router};
pub use self::translator::{CommandSet, EventTranslator, Translation, translate};
pub use self::worker_loop::{WorkerHandle, WorkerLoop};
