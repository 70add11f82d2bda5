//! ShellExecutor - コマンドを子プロセスとして実行し、出力をログファイルに残す
//!
//! コマンド行は空白で分割され、先頭がプログラム、残りが引数になります。
//! シェルは経由しません（リダイレクトやパイプは使えない）。
//!
//! ログは `<log_dir>/<log_id>` に stdout / stderr を混ぜて書きます。
//! ファイル操作は `tokio::fs` 経由で、ランタイムのスレッドを塞ぎません。

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::LogId;
use crate::ports::TaskExecutor;

#[derive(Debug, Clone)]
pub struct ShellExecutor {
    log_dir: PathBuf,
}

impl ShellExecutor {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Where the artifact for `log_id` is written.
    pub fn log_path(&self, log_id: LogId) -> PathBuf {
        self.log_dir.join(log_id.to_string())
    }

    async fn run(&self, command: &str, path: &Path) -> io::Result<bool> {
        fs::create_dir_all(&self.log_dir).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await?;

        let mut parts = command.split_whitespace();
        let success = match parts.next() {
            None => {
                file.write_all(b"empty command\n").await?;
                false
            }
            Some(program) => {
                let stdout = file.try_clone().await?.into_std().await;
                let stderr = file.try_clone().await?.into_std().await;
                let spawned = Command::new(program)
                    .args(parts)
                    .stdin(Stdio::null())
                    .stdout(Stdio::from(stdout))
                    .stderr(Stdio::from(stderr))
                    .spawn();
                match spawned {
                    Ok(mut child) => {
                        let status = child.wait().await?;
                        tracing::debug!(command, %status, "task process exited");
                        status.success()
                    }
                    Err(e) => {
                        tracing::warn!(command, error = %e, "failed to start task process");
                        let line = format!("failed to start {program:?}: {e}\n");
                        file.write_all(line.as_bytes()).await?;
                        false
                    }
                }
            }
        };

        file.flush().await?;
        file.sync_all().await?;
        Ok(success)
    }
}

#[async_trait]
impl TaskExecutor for ShellExecutor {
    async fn execute(&self, command: &str, log_id: LogId) -> bool {
        let path = self.log_path(log_id);
        tracing::info!(%log_id, command, log = %path.display(), "executing task");

        match self.run(command, &path).await {
            Ok(success) => success,
            Err(e) => {
                tracing::warn!(%log_id, command, error = %e, "task execution failed");
                false
            }
        }
    }
}
