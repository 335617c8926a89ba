// # Provider Client Trait
//
// The three remote calls a hosted DNS provider must answer for one
// update: zone lookup, record lookup, record update. Implementations
// translate provider responses into the shared error taxonomy and do
// nothing else — no retries, no caching, and no decisions about whether
// an update is needed (owned by `UpdateEngine`).
//
// Zone and record identifiers are deliberately resolved on every
// invocation and never persisted: two extra GETs per update buy freedom
// from stale-identifier bugs.

use async_trait::async_trait;

use crate::error::Result;
use crate::family::AddressFamily;
use crate::request::DnsName;

/// Provider-side zone identifier, opaque and valid only within a single
/// engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-side record identifier, opaque, same lifetime as [`ZoneId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request provider credentials.
#[derive(Clone)]
pub struct ProviderCredentials {
    /// Account email, sent as `X-Auth-Email`
    pub email: String,

    /// API key, sent as `X-Auth-Key`
    /// ⚠️ NEVER log this value
    pub api_key: String,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("email", &self.email)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

/// Trait for DNS provider clients.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Look up the provider's identifier for the apex zone.
    ///
    /// An empty result set, a malformed response, and a transport failure
    /// are all lookup errors: fatal for the current attempt, never
    /// retried or guessed around.
    async fn resolve_zone(
        &self,
        zone_domain: &str,
        credentials: &ProviderCredentials,
    ) -> Result<ZoneId>;

    /// Look up the identifier of the record matching the name and family.
    ///
    /// Exactly one matching record is assumed to exist; the first result
    /// wins, mirroring the provider's exact-match query semantics.
    async fn resolve_record(
        &self,
        zone: &ZoneId,
        name: &DnsName,
        family: AddressFamily,
        credentials: &ProviderCredentials,
    ) -> Result<RecordId>;

    /// Write the new address into the identified record.
    ///
    /// A provider-side rejection (e.g. invalid content) surfaces as
    /// `Error::ProviderUpdate` carrying the provider's message, so the
    /// caller can report it; transport and parse failures during the PUT
    /// land in the same class.
    async fn update_record(
        &self,
        zone: &ZoneId,
        record: &RecordId,
        name: &DnsName,
        family: AddressFamily,
        address: &str,
        credentials: &ProviderCredentials,
    ) -> Result<()>;

    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}
