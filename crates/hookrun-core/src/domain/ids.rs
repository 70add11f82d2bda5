//! LogId - タスクのログ成果物を識別する ID
//!
//! # ULID ベース
//! - 先頭 48 bit がミリ秒タイムスタンプ、残り 80 bit が乱数
//! - 文字列表現（26 文字の Crockford base32）がそのままログファイル名になる
//! - 乱数部分があるので、外部から推測できない
//!
//! `FromStr` は ULID として解釈できない文字列を拒否します。
//! HTTP からログを引くときのパス検証もこれで兼ねています。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::errors::HookrunError;

/// Identifier of a task's output artifact.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(Ulid);

impl LogId {
    /// ULID から LogId を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// Timestamp part of the id, in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl From<Ulid> for LogId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LogId {
    type Err = HookrunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(LogId)
            .map_err(|_| HookrunError::InvalidLogId(s.to_string()))
    }
}
