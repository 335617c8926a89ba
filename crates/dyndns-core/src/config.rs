//! Configuration types for the updater.
//!
//! Configuration is an explicit object handed to the daemon and engine at
//! construction time, never ambient global state, so tests can build
//! isolated instances.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use subtle::ConstantTimeEq;

use crate::error::Error;
use crate::log::Severity;

/// Top-level updater configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Trigger authentication
    pub auth: AuthConfig,

    /// Address cache
    pub cache: CacheConfig,

    /// Per-record event log
    pub log: LogConfig,
}

impl UpdaterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        self.auth.validate()
    }
}

/// Trigger-side credential check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Whether trigger credentials are checked at all
    #[serde(default = "default_enabled")]
    pub required: bool,

    /// Expected username
    pub username: String,

    /// Expected password
    pub password: String,
}

impl AuthConfig {
    /// Validate the auth configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.required && (self.username.is_empty() || self.password.is_empty()) {
            return Err(Error::config(
                "auth is required but username or password is empty",
            ));
        }
        Ok(())
    }

    /// Check trigger credentials.
    ///
    /// Both the username and the password must match exactly; a mismatch
    /// on either one is rejected. The comparison runs constant-time over
    /// both fields, without short-circuiting between them.
    pub fn check(&self, username: &str, password: &str) -> Result<(), Error> {
        if !self.required {
            return Ok(());
        }

        let ok = self.username.as_bytes().ct_eq(username.as_bytes())
            & self.password.as_bytes().ct_eq(password.as_bytes());
        if bool::from(ok) {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

/// Address cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether cached addresses short-circuit updates
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding one cache file per (record, zone, family) key
    pub dir: PathBuf,
}

/// Event log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Whether update events are written at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Events below this severity are dropped
    #[serde(default)]
    pub min_level: Severity,

    /// Directory holding one log sink per (record, zone) pair
    pub dir: PathBuf,
}

fn default_enabled() -> bool {
    true
}
