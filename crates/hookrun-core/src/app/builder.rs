//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! Config からデフォルトの実装（FileQueueStore / ShellExecutor / HttpReporter）を組み立てます。
//! store / executor / reporter は差し替え可能です。
//!
//! # Fail-fast
//! - build() 時にタスクログ用ディレクトリを作る
//! - HTTP クライアントの初期化に失敗したら BuildError を返す

use std::sync::Arc;

use super::server::AppState;
use super::translator::EventTranslator;
use super::worker_loop::WorkerLoop;
use crate::config::Config;
use crate::impls::{FileQueueStore, HttpReporter, ShellExecutor};
use crate::ports::{IdGenerator, QueueStore, ResultReporter, SystemClock, TaskExecutor, UlidGenerator};

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot create log directory {path}: {source}")]
    LogDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// # 使用例
/// ```ignore
/// let app = AppBuilder::new(Config::from_env()?).build()?;
/// let worker = WorkerHandle::spawn(app.worker);
/// axum::serve(listener, build_router(app.state)).await?;
/// ```
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn QueueStore>>,
    executor: Option<Arc<dyn TaskExecutor>>,
    reporter: Option<Arc<dyn ResultReporter>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl AppBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: None,
            executor: None,
            reporter: None,
            ids: None,
        }
    }

    pub fn store(mut self, store: Arc<dyn QueueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn TaskExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn ResultReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let config = self.config;
        let tasks_dir = config.tasks_dir();
        std::fs::create_dir_all(&tasks_dir).map_err(|source| BuildError::LogDir {
            path: tasks_dir.display().to_string(),
            source,
        })?;

        let store = match self.store {
            Some(store) => store,
            None => Arc::new(FileQueueStore::new(&config.queue_path)),
        };
        let executor = match self.executor {
            Some(executor) => executor,
            None => Arc::new(ShellExecutor::new(&tasks_dir)),
        };
        let reporter = match self.reporter {
            Some(reporter) => reporter,
            None => Arc::new(HttpReporter::new(
                config.api_token.clone(),
                config.report_timeout,
            )?),
        };
        let ids = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(SystemClock)),
        };

        let translator = EventTranslator::new(
            store.clone(),
            ids,
            reporter.clone(),
            config.commands.clone(),
        );
        let state = AppState::new(translator, tasks_dir, config.journal_path());
        let worker =
            WorkerLoop::new(store, executor, reporter).with_poll_interval(config.poll_interval);

        Ok(App {
            config,
            state,
            worker,
        })
    }
}

/// App は起動可能な部品一式
pub struct App {
    pub config: Config,
    pub state: AppState,
    pub worker: WorkerLoop,
}
