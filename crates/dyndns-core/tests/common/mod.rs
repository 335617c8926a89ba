//! Test doubles and common utilities for the update-flow contract tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use dyndns_core::error::{Error, Result};
use dyndns_core::family::AddressFamily;
use dyndns_core::request::DnsName;
use dyndns_core::traits::{ProviderClient, ProviderCredentials, RecordId, ZoneId};

/// A provider that records the order of calls and can be told to fail
/// at each step of the sequence.
pub struct ScriptedProvider {
    calls: Arc<Mutex<Vec<&'static str>>>,
    update_count: Arc<AtomicUsize>,
    fail_zone: bool,
    fail_record: bool,
    reject_update: Option<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            update_count: Arc::new(AtomicUsize::new(0)),
            fail_zone: false,
            fail_record: false,
            reject_update: None,
        }
    }

    pub fn failing_zone_lookup() -> Self {
        Self {
            fail_zone: true,
            ..Self::new()
        }
    }

    pub fn failing_record_lookup() -> Self {
        Self {
            fail_record: true,
            ..Self::new()
        }
    }

    pub fn rejecting_updates(message: &str) -> Self {
        Self {
            reject_update: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Create a provider that shares call records with an existing one,
    /// so tests keep a handle after boxing the original into the engine.
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            calls: Arc::clone(&other.calls),
            update_count: Arc::clone(&other.update_count),
            fail_zone: other.fail_zone,
            fail_record: other.fail_record,
            reject_update: other.reject_update.clone(),
        }
    }

    /// The call names in invocation order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times update_record() was reached.
    pub fn update_count(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProviderClient for ScriptedProvider {
    async fn resolve_zone(
        &self,
        zone_domain: &str,
        _credentials: &ProviderCredentials,
    ) -> Result<ZoneId> {
        self.calls.lock().unwrap().push("resolve_zone");
        if self.fail_zone {
            return Err(Error::lookup(format!("no zone matching {} found", zone_domain)));
        }
        Ok(ZoneId::new("zone-1"))
    }

    async fn resolve_record(
        &self,
        _zone: &ZoneId,
        name: &DnsName,
        family: AddressFamily,
        _credentials: &ProviderCredentials,
    ) -> Result<RecordId> {
        self.calls.lock().unwrap().push("resolve_record");
        if self.fail_record {
            return Err(Error::lookup(format!(
                "no record matching {} ({}) found",
                name.fqdn(),
                family.record_type()
            )));
        }
        Ok(RecordId::new("record-1"))
    }

    async fn update_record(
        &self,
        _zone: &ZoneId,
        _record: &RecordId,
        _name: &DnsName,
        _family: AddressFamily,
        _address: &str,
        _credentials: &ProviderCredentials,
    ) -> Result<()> {
        self.calls.lock().unwrap().push("update_record");
        self.update_count.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.reject_update {
            return Err(Error::update(message.clone()));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

pub fn credentials() -> ProviderCredentials {
    ProviderCredentials {
        email: "ops@example.com".to_string(),
        api_key: "key-123".to_string(),
    }
}

pub fn record() -> DnsName {
    DnsName::split("home.example.com").unwrap()
}
