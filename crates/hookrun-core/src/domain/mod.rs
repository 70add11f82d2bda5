//! Domain - ドメインモデル（ID、タスク、実行結果、受信イベント、エラー）

pub mod errors;
pub mod event;
pub mod ids;
pub mod outcome;
pub mod task;

pub use self::errors::HookrunError;
pub use self::event::{BranchRef, PrAction, PullRequest, WebhookEvent};
pub use self::ids::LogId;
pub use self::outcome::TaskOutcome;
pub use self::task::{CallbackTarget, Task};
