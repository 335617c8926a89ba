//! Error types for the updater.
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// Trigger credentials were missing or wrong
    #[error("Access Denied")]
    Unauthorized,

    /// The trigger domain could not be split into record and zone
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Zone or record lookup failed: no match, malformed response, or
    /// transport failure during a GET
    #[error("provider lookup failed: {0}")]
    ProviderLookup(String),

    /// The record update was rejected or the PUT failed
    #[error("provider update failed: {message}")]
    ProviderUpdate {
        /// Provider-supplied error message when one was present
        message: String,
    },

    /// Cache backing-store write failure
    #[error("cache store error: {0}")]
    CacheStore(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an invalid-domain error
    pub fn invalid_domain(domain: impl Into<String>) -> Self {
        Self::InvalidDomain(domain.into())
    }

    /// Create a provider lookup error
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::ProviderLookup(msg.into())
    }

    /// Create a provider update error
    pub fn update(msg: impl Into<String>) -> Self {
        Self::ProviderUpdate {
            message: msg.into(),
        }
    }

    /// Create a cache store error
    pub fn cache_store(msg: impl Into<String>) -> Self {
        Self::CacheStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
