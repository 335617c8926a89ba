// # dyndns-core
//
// Core library for the HTTP-triggered dynamic-DNS updater.
//
// ## Architecture Overview
//
// - **AddressCache**: persists the last provider-confirmed address per
//   (record, zone, family) key, so unchanged addresses cost no API calls
// - **UpdateLog**: append-only, leveled event log, one sink per record
// - **ProviderClient**: the three remote calls an update needs — zone
//   lookup, record lookup, record update
// - **UpdateEngine**: orchestrates one (address, family) invocation:
//   cache check → resolve zone → resolve record → apply update
//
// ## Design Principles
//
// 1. **Explicit configuration**: everything is passed in at construction
//    time; there is no ambient global state
// 2. **Idempotency**: the cache is written only after the provider confirms
//    an update, so a failed attempt is retried in full on the next trigger
// 3. **No retries**: every failure is terminal for its invocation; the
//    external trigger's schedule provides the retry loop
// 4. **Library-first**: the daemon is a thin HTTP shell over this crate

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod family;
pub mod log;
pub mod request;
pub mod traits;

// Re-export core types for convenience
pub use cache::{FileAddressCache, MemoryAddressCache};
pub use config::{AuthConfig, CacheConfig, LogConfig, UpdaterConfig};
pub use engine::{UpdateEngine, UpdateOutcome};
pub use error::{Error, Result};
pub use family::AddressFamily;
pub use log::{Severity, UpdateLog};
pub use request::DnsName;
pub use traits::{AddressCache, ProviderClient, ProviderCredentials, RecordId, ZoneId};
