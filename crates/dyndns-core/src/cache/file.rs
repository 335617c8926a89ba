// # File Address Cache
//
// One file per (record, zone, family) key, holding the raw address
// string the provider last confirmed. A missing file is the "never
// cached" state. Writes go through a temp file and rename so a crash
// mid-write never leaves a torn entry.
//
// ## File Layout
//
// ```text
// <dir>/home.example.com.IPv4.cache   ->  "203.0.113.7"
// <dir>/home.example.com.IPv6.cache   ->  "2001:db8::7"
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::family::AddressFamily;
use crate::request::DnsName;
use crate::traits::AddressCache;

/// File-backed address cache.
#[derive(Debug)]
pub struct FileAddressCache {
    dir: PathBuf,
    enabled: bool,
}

impl FileAddressCache {
    /// Create the cache, creating the backing directory if needed.
    pub async fn new(config: CacheConfig) -> Result<Self> {
        if config.enabled && !config.dir.exists() {
            fs::create_dir_all(&config.dir).await.map_err(|e| {
                Error::config(format!(
                    "failed to create cache directory {}: {}",
                    config.dir.display(),
                    e
                ))
            })?;
        }

        Ok(Self {
            dir: config.dir,
            enabled: config.enabled,
        })
    }

    fn entry_path(&self, name: &DnsName, family: AddressFamily) -> PathBuf {
        self.dir
            .join(format!("{}.{}.cache", name.fqdn(), family.name()))
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut temp = path.to_path_buf();
        temp.set_extension("tmp");
        temp
    }
}

#[async_trait]
impl AddressCache for FileAddressCache {
    async fn is_current(&self, name: &DnsName, family: AddressFamily, address: &str) -> bool {
        if !self.enabled {
            return false;
        }

        // Missing or unreadable entries are the normal "not cached" state.
        match fs::read_to_string(self.entry_path(name, family)).await {
            Ok(cached) => cached == address,
            Err(_) => false,
        }
    }

    async fn store(&self, name: &DnsName, family: AddressFamily, address: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.entry_path(name, family);
        let temp = Self::temp_path(&path);

        fs::write(&temp, address).await.map_err(|e| {
            Error::cache_store(format!("failed to write {}: {}", temp.display(), e))
        })?;

        // Atomic rename (temp -> actual)
        fs::rename(&temp, &path).await.map_err(|e| {
            Error::cache_store(format!(
                "failed to rename {} to {}: {}",
                temp.display(),
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
