//! Server - HTTP の受け口
//!
//! # エンドポイント
//! - `POST /` - webhook を受け付け、受付メッセージをテキストで返す
//! - `GET /{log_id}` - タスクのログを返す。まだ無ければ `:)`
//!
//! どちらも常に `200 OK` を返します。受け付けた webhook はすべて
//! リクエストジャーナル（`server.log`）に追記されます。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path as UrlPath, State};
use axum::http::HeaderMap;
use axum::http::header::HOST;
use axum::routing::get;
use tokio::io::AsyncWriteExt;

use super::translator::EventTranslator;
use crate::domain::LogId;

/// Body served when a log is missing.
pub const PLACEHOLDER_BODY: &[u8] = b":)";

const DEFAULT_HOST: &str = "localhost";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    translator: EventTranslator,

    /// Directory holding one log file per task.
    tasks_dir: PathBuf,

    /// Append-only record of webhook payloads and acks.
    journal_path: PathBuf,
}

impl AppState {
    pub fn new(
        translator: EventTranslator,
        tasks_dir: impl Into<PathBuf>,
        journal_path: impl Into<PathBuf>,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                translator,
                tasks_dir: tasks_dir.into(),
                journal_path: journal_path.into(),
            }),
        }
    }

    pub fn translator(&self) -> &EventTranslator {
        &self.inner.translator
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.inner.tasks_dir
    }

    pub fn journal_path(&self) -> &Path {
        &self.inner.journal_path
    }

    async fn journal(&self, payload: &serde_json::Value, message: &str) {
        let entry = format!("<<< {payload}\n\n>>> {message}\n\n");
        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.journal_path())
                .await?;
            file.write_all(entry.as_bytes()).await?;
            file.flush().await
        }
        .await;
        if let Err(e) = result {
            tracing::warn!(
                path = %self.journal_path().display(),
                error = %e,
                "failed to append to request journal"
            );
        }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(placeholder_handler).post(webhook_handler))
        .route("/{log_id}", get(log_handler))
        .with_state(app_state)
}

async fn webhook_handler(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> String {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_HOST);
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "webhook body is not JSON");
        serde_json::Value::Null
    });
    tracing::debug!(%payload, "webhook received");

    let message = state.inner.translator.accept(host, &payload).await;
    state.journal(&payload, &message).await;
    message
}

async fn placeholder_handler() -> &'static [u8] {
    PLACEHOLDER_BODY
}

async fn log_handler(State(state): State<AppState>, UrlPath(name): UrlPath<String>) -> Vec<u8> {
    let Ok(log_id) = name.parse::<LogId>() else {
        return PLACEHOLDER_BODY.to_vec();
    };
    match tokio::fs::read(state.tasks_dir().join(log_id.to_string())).await {
        Ok(bytes) => bytes,
        Err(_) => PLACEHOLDER_BODY.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::tempdir;
    use tower::ServiceExt;
    use ulid::Ulid;

    use crate::app::translator::CommandSet;
    use crate::impls::InMemoryQueueStore;
    use crate::ports::{QueueStore, SystemClock, UlidGenerator};
    use crate::test_utils::RecordingReporter;

    struct TestApp {
        state: AppState,
        store: Arc<InMemoryQueueStore>,
        _dir: tempfile::TempDir,
    }

    fn test_app() -> TestApp {
        let dir = tempdir().unwrap();
        let store = Arc::new(InMemoryQueueStore::new());
        let translator = EventTranslator::new(
            store.clone(),
            Arc::new(UlidGenerator::new(SystemClock)),
            Arc::new(RecordingReporter::new()),
            CommandSet::default(),
        );
        let tasks_dir = dir.path().join("tasks");
        std::fs::create_dir_all(&tasks_dir).unwrap();
        let state = AppState::new(translator, tasks_dir, dir.path().join("server.log"));
        TestApp {
            state,
            store,
            _dir: dir,
        }
    }

    fn webhook(body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("host", "ci.example.com:9999")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn webhook_returns_the_ack_and_queues_a_task() {
        let app = test_app();
        let body = serde_json::json!({
            "action": "opened",
            "pull_request": {"comments_url": null, "base": {"ref": "main"}, "head": {"ref": "feature-x"}}
        });

        let response = build_router(app.state.clone())
            .oneshot(webhook(&body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        let queued = app.store.load().await;
        assert_eq!(queued.len(), 1);
        assert_eq!(
            text,
            format!(
                "Task was queued to test branch \"feature-x\". http://ci.example.com:9999/{}",
                queued[0].log_id()
            )
        );
    }

    #[tokio::test]
    async fn webhook_is_written_to_the_journal() {
        let app = test_app();
        let body = serde_json::json!({"action": "closed", "pull_request": {"merged": false}});

        build_router(app.state.clone())
            .oneshot(webhook(&body))
            .await
            .unwrap();

        let journal = std::fs::read_to_string(app.state.journal_path()).unwrap();
        assert_eq!(journal, format!("<<< {body}\n\n>>> \n\n"));
    }

    #[tokio::test]
    async fn non_json_body_is_acknowledged_with_nothing() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("not json"))
            .unwrap();

        let response = build_router(app.state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
        assert!(app.store.load().await.is_empty());
    }

    #[tokio::test]
    async fn log_endpoint_serves_the_log_file() {
        let app = test_app();
        let log_id = LogId::from_ulid(Ulid::new());
        std::fs::write(app.state.tasks_dir().join(log_id.to_string()), b"feature-x\n").unwrap();

        let request = Request::builder()
            .uri(format!("/{log_id}"))
            .body(Body::empty())
            .unwrap();
        let response = build_router(app.state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"feature-x\n");
    }

    #[tokio::test]
    async fn unknown_or_invalid_logs_get_the_placeholder() {
        let app = test_app();
        for uri in [
            "/".to_string(),
            format!("/{}", LogId::from_ulid(Ulid::new())),
            "/server.log".to_string(),
            "/..%2Fserver.log".to_string(),
        ] {
            let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();
            let response = build_router(app.state.clone()).oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_bytes(response).await, PLACEHOLDER_BODY, "{uri}");
        }
    }
}
