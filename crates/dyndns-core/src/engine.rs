//! Core update engine
//!
//! The UpdateEngine runs one invocation per (address, family) pair:
//!
//! 1. Consult the AddressCache; a hit ends the invocation with zero
//!    remote calls
//! 2. Resolve the zone identifier
//! 3. Resolve the record identifier within that zone
//! 4. Apply the update, then persist the address in the cache
//!
//! Every step is mirrored into the record's event log. The cache is
//! written only after the provider confirms the update — a failed or
//! rejected update leaves the cache untouched so the next trigger
//! retries the full sequence. No step is retried internally.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::family::AddressFamily;
use crate::log::{Severity, UpdateLog};
use crate::request::DnsName;
use crate::traits::{AddressCache, ProviderClient, ProviderCredentials};

/// What a single invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The address was already cached as current; no remote calls made
    Skipped,
    /// The provider confirmed the new address
    Updated,
}

/// Orchestrates cache, provider, and event log for one record.
pub struct UpdateEngine {
    provider: Box<dyn ProviderClient>,
    cache: Box<dyn AddressCache>,
    log: UpdateLog,
}

impl UpdateEngine {
    pub fn new(
        provider: Box<dyn ProviderClient>,
        cache: Box<dyn AddressCache>,
        log: UpdateLog,
    ) -> Self {
        Self {
            provider,
            cache,
            log,
        }
    }

    /// Synchronize one record with one caller-supplied address.
    ///
    /// The two address families are independent invocations over
    /// disjoint cache keys; callers run them in any order.
    pub async fn update_address(
        &self,
        address: &str,
        family: AddressFamily,
        name: &DnsName,
        credentials: &ProviderCredentials,
    ) -> Result<UpdateOutcome> {
        if self.cache.is_current(name, family, address).await {
            debug!("{} for {} unchanged, skipping update", family, name.fqdn());
            self.log
                .log(
                    name,
                    Severity::Debug,
                    &format!(
                        "{} for {} ({}) is already cached.",
                        family,
                        name.record_name(),
                        address
                    ),
                )
                .await;
            return Ok(UpdateOutcome::Skipped);
        }

        let zone = match self.provider.resolve_zone(name.zone_domain(), credentials).await {
            Ok(zone) => zone,
            Err(e) => {
                self.log
                    .log(name, Severity::Error, &format!("Error fetching zone ID: {}", e))
                    .await;
                return Err(e);
            }
        };

        let record = match self
            .provider
            .resolve_record(&zone, name, family, credentials)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                self.log
                    .log(
                        name,
                        Severity::Error,
                        &format!("Error fetching DNS record ID: {}", e),
                    )
                    .await;
                return Err(e);
            }
        };

        match self
            .provider
            .update_record(&zone, &record, name, family, address, credentials)
            .await
        {
            Ok(()) => {
                info!(
                    "set {} {} to {}",
                    family.record_type(),
                    name.fqdn(),
                    address
                );
                self.log
                    .log(
                        name,
                        Severity::Info,
                        &format!(
                            "Set {} {} to {}",
                            family.record_type(),
                            name.record_name(),
                            address
                        ),
                    )
                    .await;

                // The remote update already succeeded; a cache write
                // failure only costs a redundant sequence next trigger.
                if let Err(e) = self.cache.store(name, family, address).await {
                    warn!("cache store for {} failed: {}", name.fqdn(), e);
                    self.log
                        .log(
                            name,
                            Severity::Warn,
                            &format!(
                                "Failed to cache {} for {}: {}",
                                address,
                                name.record_name(),
                                e
                            ),
                        )
                        .await;
                }

                Ok(UpdateOutcome::Updated)
            }
            Err(e) => {
                let detail = match &e {
                    Error::ProviderUpdate { message } => message.clone(),
                    other => other.to_string(),
                };
                self.log
                    .log(
                        name,
                        Severity::Error,
                        &format!(
                            "Error updating {} with {} address: {}",
                            name.record_name(),
                            family,
                            detail
                        ),
                    )
                    .await;
                Err(e)
            }
        }
    }
}
