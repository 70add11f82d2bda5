//! fsync ヘルパー（キューのスナップショット用）
//!
//! rename を永続化するには、親ディレクトリのエントリも sync する必要があります。

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Syncs a file's contents and metadata to disk.
pub fn fsync_file(file: &File) -> io::Result<()> {
    file.sync_all()
}

/// Syncs a directory so that entries created or renamed in it survive a crash.
///
/// An empty path means the current directory.
pub fn fsync_dir(dir_path: &Path) -> io::Result<()> {
    let dir_path = if dir_path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir_path
    };
    let dir = OpenOptions::new().read(true).open(dir_path)?;
    dir.sync_all()
}
