//! Config - 環境変数からの設定
//!
//! | 変数 | 既定値 | 意味 |
//! |------|--------|------|
//! | `HOOKRUN_HOST` | `127.0.0.1` | 待ち受けアドレス |
//! | `HOOKRUN_PORT` | `9999` | 待ち受けポート |
//! | `HOOKRUN_QUEUE_PATH` | `queue.json` | キューのスナップショット |
//! | `HOOKRUN_LOG_DIR` | `logs` | `tasks/` と `server.log` の置き場 |
//! | `HOOKRUN_POLL_INTERVAL_SECS` | `5` | ワーカーのアイドル時の sleep |
//! | `HOOKRUN_API_TOKEN` | なし | 結果 POST の Bearer トークン |
//! | `HOOKRUN_REPORT_TIMEOUT_SECS` | `10` | 結果 POST のタイムアウト |
//! | `HOOKRUN_TEST_COMMAND` | `echo {branch}` | テストコマンド（`{branch}` は head ブランチ） |
//! | `HOOKRUN_DEPLOY_COMMAND` | `docker-compose up -d --build` | マージ後に走らせるコマンド |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::app::translator::{CommandSet, DEFAULT_DEPLOY_COMMAND, DEFAULT_TEST_COMMAND};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// Queue snapshot file
    pub queue_path: PathBuf,

    /// Log root; task logs go to `<log_dir>/tasks`
    pub log_dir: PathBuf,

    pub poll_interval: Duration,

    pub api_token: Option<String>,

    pub report_timeout: Duration,

    pub commands: CommandSet,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = string_or("HOOKRUN_HOST", "127.0.0.1");
        let port = parse_or(&lookup, "HOOKRUN_PORT", 9999u16)?;
        let queue_path = PathBuf::from(string_or("HOOKRUN_QUEUE_PATH", "queue.json"));
        let log_dir = PathBuf::from(string_or("HOOKRUN_LOG_DIR", "logs"));
        let poll_interval =
            Duration::from_secs(parse_or(&lookup, "HOOKRUN_POLL_INTERVAL_SECS", 5u64)?);
        let report_timeout =
            Duration::from_secs(parse_or(&lookup, "HOOKRUN_REPORT_TIMEOUT_SECS", 10u64)?);
        let api_token = lookup("HOOKRUN_API_TOKEN").filter(|t| !t.trim().is_empty());

        let commands = CommandSet {
            test_command: string_or("HOOKRUN_TEST_COMMAND", DEFAULT_TEST_COMMAND),
            deploy_command: string_or("HOOKRUN_DEPLOY_COMMAND", DEFAULT_DEPLOY_COMMAND),
        };

        Ok(Self {
            host,
            port,
            queue_path,
            log_dir,
            poll_interval,
            api_token,
            report_timeout,
            commands,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.log_dir.join("tasks")
    }

    pub fn journal_path(&self) -> PathBuf {
        self.log_dir.join("server.log")
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(key.to_string(), format!("{}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9999");
        assert_eq!(config.queue_path, PathBuf::from("queue.json"));
        assert_eq!(config.tasks_dir(), PathBuf::from("logs").join("tasks"));
        assert_eq!(config.journal_path(), PathBuf::from("logs").join("server.log"));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.report_timeout, Duration::from_secs(10));
        assert_eq!(config.api_token, None);
        assert_eq!(config.commands, CommandSet::default());
    }

    #[test]
    fn values_are_read_from_the_lookup() {
        let config = config_from(&[
            ("HOOKRUN_HOST", "0.0.0.0"),
            ("HOOKRUN_PORT", "8080"),
            ("HOOKRUN_LOG_DIR", "/var/log/hookrun"),
            ("HOOKRUN_POLL_INTERVAL_SECS", "1"),
            ("HOOKRUN_API_TOKEN", "abc"),
            ("HOOKRUN_TEST_COMMAND", "make test BRANCH={branch}"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.tasks_dir(), PathBuf::from("/var/log/hookrun/tasks"));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(
            config.commands.test_command_for("main"),
            "make test BRANCH=main"
        );
    }

    #[test]
    fn blank_token_counts_as_unset() {
        let config = config_from(&[("HOOKRUN_API_TOKEN", "  ")]).unwrap();
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("HOOKRUN_PORT", "ninety")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key, _) if key == "HOOKRUN_PORT"));
    }
}
