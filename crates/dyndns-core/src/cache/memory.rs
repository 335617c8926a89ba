// # Memory Address Cache
//
// HashMap-backed cache with no persistence. A restart simply costs one
// extra provider round-trip per record, so this suits tests and
// containerized deployments without a writable volume.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::family::AddressFamily;
use crate::request::DnsName;
use crate::traits::AddressCache;

/// In-memory address cache implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryAddressCache {
    inner: Arc<RwLock<HashMap<(String, AddressFamily), String>>>,
    disabled: bool,
}

impl MemoryAddressCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that never matches and never stores.
    pub fn new_disabled() -> Self {
        Self {
            inner: Arc::default(),
            disabled: true,
        }
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl AddressCache for MemoryAddressCache {
    async fn is_current(&self, name: &DnsName, family: AddressFamily, address: &str) -> bool {
        if self.disabled {
            return false;
        }

        let guard = self.inner.read().await;
        guard
            .get(&(name.fqdn(), family))
            .is_some_and(|cached| cached == address)
    }

    async fn store(&self, name: &DnsName, family: AddressFamily, address: &str) -> Result<()> {
        if self.disabled {
            return Ok(());
        }

        let mut guard = self.inner.write().await;
        guard.insert((name.fqdn(), family), address.to_string());
        Ok(())
    }
}
