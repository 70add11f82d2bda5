//! FileQueueStore - JSON ファイル 1 つにキュー全体を保存する
//!
//! # 書き込み手順（アトミック置換）
//! 1. 親ディレクトリに書き込みごとの一時ファイルを作って書く
//! 2. 一時ファイルを fsync
//! 3. `<path>` に rename
//! 4. 親ディレクトリを fsync
//!
//! 一時ファイルは書き込みごとに別名なので、受付とワーカーが同時に save しても
//! 互いの途中状態を上書きしません。読み手は常に完全なスナップショットを見ます。
//! ファイル I/O は `spawn_blocking` の中で行います。

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use super::fsync::{fsync_dir, fsync_file};
use crate::domain::Task;
use crate::ports::{QueueStore, StoreError};

#[derive(Debug, Clone)]
pub struct FileQueueStore {
    path: PathBuf,
}

impl FileQueueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QueueStore for FileQueueStore {
    async fn load(&self) -> Vec<Task> {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || read_snapshot(&path)).await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(error = %e, "queue load task failed, treating queue as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let path = self.path.clone();
        let tasks = tasks.to_vec();
        tokio::task::spawn_blocking(move || write_snapshot_atomic(&path, &tasks))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))?
    }
}

fn read_snapshot(path: &Path) -> Vec<Task> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!("Failed to read queue {}: {}", path.display(), err);
            return Vec::new();
        }
    };
    match serde_json::from_slice::<Vec<Task>>(&bytes) {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::warn!("Failed to parse queue {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn write_snapshot_atomic(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let bytes = serde_json::to_vec(tasks)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&bytes)?;
    fsync_file(tmp.as_file())?;

    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    fsync_dir(parent)?;
    Ok(())
}
