//! Endpoint tests for the trigger handler: authentication, domain
//! validation, and the per-family update loop, driven through the
//! router in-process.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dyndns_core::config::AuthConfig;
use dyndns_core::error::Result;
use dyndns_core::family::AddressFamily;
use dyndns_core::request::DnsName;
use dyndns_core::traits::{ProviderClient, ProviderCredentials, RecordId, ZoneId};
use dyndns_core::{MemoryAddressCache, UpdateEngine, UpdateLog};
use dyndnsd::server::{AppState, router};

/// A provider that answers every call and counts how many it saw.
struct StubProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl ProviderClient for StubProvider {
    async fn resolve_zone(
        &self,
        _zone_domain: &str,
        _credentials: &ProviderCredentials,
    ) -> Result<ZoneId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ZoneId::new("zone-1"))
    }

    async fn resolve_record(
        &self,
        _zone: &ZoneId,
        _name: &DnsName,
        _family: AddressFamily,
        _credentials: &ProviderCredentials,
    ) -> Result<RecordId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

fn app() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = UpdateEngine::new(
        Box::new(StubProvider {
            calls: Arc::clone(&calls),
        }),
        Box::new(MemoryAddressCache::new()),
        UpdateLog::disabled(),
    );
    let state = AppState {
        engine: Arc::new(engine),
        auth: AuthConfig {
            required: true,
            username: "sunshine".to_string(),
            password: "abc123".to_string(),
        },
    };
    (router(state), calls)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn wrong_password_is_rejected_before_any_update() {
    let (app, calls) = app();

    let (status, body) = get(
        app,
        "/update?user=sunshine&pass=wrong&domain=home.example.com&ipv4=203.0.113.7",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access Denied"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_username_with_correct_password_is_rejected() {
    // Both fields must match; a correct password alone is not enough.
    let (app, calls) = app();

    let (status, _) = get(
        app,
        "/update?user=ghost&pass=abc123&domain=home.example.com&ipv4=203.0.113.7",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn single_label_domain_is_a_bad_request() {
    let (app, calls) = app();

    let (status, body) = get(
        app,
        "/update?user=sunshine&pass=abc123&domain=a&ipv4=203.0.113.7",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid domain"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn update_then_repeat_hits_the_cache() {
    let (app, calls) = app();
    let uri = "/update?user=sunshine&pass=abc123&domain=home.example.com\
               &ipv4=203.0.113.7&cfemail=ops@example.com&cfapikey=key-123";

    let (status, body) = get(app.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IPv4: updated"));
    assert_eq!(calls.load(Ordering::SeqCst), 3, "zone, record, update");

    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IPv4: already current"));
    assert_eq!(calls.load(Ordering::SeqCst), 3, "second trigger is a cache hit");
}

#[tokio::test]
async fn both_families_update_in_one_request() {
    let (app, calls) = app();

    let (status, body) = get(
        app,
        "/update?user=sunshine&pass=abc123&domain=home.example.com\
         &ipv4=203.0.113.7&ipv6=2001:db8::7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IPv4: updated"));
    assert!(body.contains("IPv6: updated"));
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

/// A provider whose zone lookup always fails.
struct UnreachableProvider;

#[async_trait::async_trait]
impl ProviderClient for UnreachableProvider {
    async fn resolve_zone(
        &self,
        zone_domain: &str,
        _credentials: &ProviderCredentials,
    ) -> Result<ZoneId> {
        Err(dyndns_core::Error::lookup(format!(
            "no zone matching {} found",
            zone_domain
        )))
    }

    async fn resolve_record(
        &self,
        _zone: &ZoneId,
        _name: &DnsName,
        _family: AddressFamily,
        _credentials: &ProviderCredentials,
    ) -> Result<RecordId> {
        unreachable!("record lookup must not run after a failed zone lookup")
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
        unreachable!("update must not run after a failed zone lookup")
    }

    fn provider_name(&self) -> &'static str {
        "unreachable"
    }
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let engine = UpdateEngine::new(
        Box::new(UnreachableProvider),
        Box::new(MemoryAddressCache::new()),
        UpdateLog::disabled(),
    );
    let state = AppState {
        engine: Arc::new(engine),
        auth: AuthConfig {
            required: true,
            username: "sunshine".to_string(),
            password: "abc123".to_string(),
        },
    };

    let (status, body) = get(
        router(state),
        "/update?user=sunshine&pass=abc123&domain=ghost.example.com&ipv4=203.0.113.7",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("provider lookup failed"));
}

#[tokio::test]
async fn no_addresses_is_a_no_op() {
    let (app, calls) = app();

    let (status, body) = get(app, "/update?user=sunshine&pass=abc123&domain=home.example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("nothing to do"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_answers_without_credentials() {
    let (app, _) = app();

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
