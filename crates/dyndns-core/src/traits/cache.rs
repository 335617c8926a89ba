// # Address Cache Trait
//
// Persists the last address the provider confirmed, keyed by
// (record, zone, family). The engine consults it before making any
// remote call and writes it only after a successful update, which is
// what keeps repeated triggers with an unchanged address free.

use async_trait::async_trait;

use crate::error::Result;
use crate::family::AddressFamily;
use crate::request::DnsName;

/// Trait for address cache implementations.
///
/// No concurrency guarantees are required beyond safe sequential use
/// from independent invocations; the keys of the two families are
/// disjoint, and last-writer-wins is acceptable.
#[async_trait]
pub trait AddressCache: Send + Sync {
    /// Whether `address` is exactly the last value stored for this key.
    ///
    /// A missing entry is the normal "never cached" state, and a failed
    /// read is treated the same way — this method cannot fail. Always
    /// false when caching is disabled.
    async fn is_current(&self, name: &DnsName, family: AddressFamily, address: &str) -> bool;

    /// Record `address` as current for this key, replacing any prior
    /// value. No-op when caching is disabled.
    async fn store(&self, name: &DnsName, family: AddressFamily, address: &str) -> Result<()>;
}
