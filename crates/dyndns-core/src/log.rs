// # Update Event Log
//
// Append-only record of what each trigger did, one sink per
// (record, zone) pair, written next to the cache files. Lines are
// `[timestamp] message`; events below the configured minimum severity
// are dropped.
//
// Writes are best-effort: a failed append never aborts the update that
// produced it. Failures are visible only through `tracing`.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::LogConfig;
use crate::error::Error;
use crate::request::DnsName;

/// Event severity, ordered ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(Error::config(format!("unknown log level: {}", other))),
        }
    }
}

/// Per-record event log.
#[derive(Debug)]
pub struct UpdateLog {
    dir: PathBuf,
    min_level: Severity,
    enabled: bool,
    // Serializes appends so concurrent family updates write whole lines.
    write_lock: Mutex<()>,
}

impl UpdateLog {
    /// Create an event log writing into the configured directory.
    pub fn new(config: LogConfig) -> Self {
        Self {
            dir: config.dir,
            min_level: config.min_level,
            enabled: config.enabled,
            write_lock: Mutex::new(()),
        }
    }

    /// An event log that drops everything.
    pub fn disabled() -> Self {
        Self::new(LogConfig {
            enabled: false,
            min_level: Severity::Error,
            dir: PathBuf::new(),
        })
    }

    /// Append one event line to the record's sink.
    ///
    /// No-op when logging is disabled or the severity is below the
    /// configured minimum. I/O failures are swallowed.
    pub async fn log(&self, name: &DnsName, severity: Severity, message: &str) {
        if !self.enabled || severity < self.min_level {
            return;
        }

        if let Err(e) = self.append(name, message).await {
            tracing::debug!("event log write for {} failed: {}", name.fqdn(), e);
        }
    }

    async fn append(&self, name: &DnsName, message: &str) -> std::io::Result<()> {
        let path = self.dir.join(format!("{}.log", name.fqdn()));
        let line = format!("{}{}\n", Local::now().format("[%Y-%m-%d %H:%M:%S] "), message);

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}
