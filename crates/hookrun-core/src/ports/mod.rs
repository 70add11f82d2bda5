//! Ports - 抽象化レイヤー
//!
//! 外部資源（ファイル、子プロセス、HTTP）への入口を trait として定義します。
//! 実装は `impls` にあり、テストでは差し替えられます。

pub mod clock;
pub mod executor;
pub mod id_generator;
pub mod queue_store;
pub mod reporter;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::executor::TaskExecutor;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::queue_store::{QueueStore, StoreError};
pub use self::reporter::ResultReporter;
