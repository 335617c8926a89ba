// # HTTP trigger endpoint
//
// The request layer: parse query parameters, check credentials, split
// the trigger domain, then run the engine once per supplied address
// family. All update logic lives in dyndns-core; this file only
// translates HTTP into engine calls and engine outcomes into status
// codes.

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use dyndns_core::config::AuthConfig;
use dyndns_core::family::AddressFamily;
use dyndns_core::request::DnsName;
use dyndns_core::traits::ProviderCredentials;
use dyndns_core::{UpdateEngine, UpdateOutcome};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<UpdateEngine>,
    pub auth: AuthConfig,
}

/// Query parameters of the trigger request. Every field is optional and
/// defaults to empty, so callers managing a single family can omit the
/// other one entirely.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    pub user: String,
    pub pass: String,
    pub ipv4: String,
    pub ipv6: String,
    pub domain: String,
    pub cfapikey: String,
    pub cfemail: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/update", get(update))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn update(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> (StatusCode, String) {
    // Credentials gate everything; no update logic runs on a mismatch.
    if let Err(e) = state.auth.check(&params.user, &params.pass) {
        return (StatusCode::UNAUTHORIZED, format!("{}\n", e));
    }

    let name = match DnsName::split(&params.domain) {
        Ok(name) => name,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("{}\n", e)),
    };

    let credentials = ProviderCredentials {
        email: params.cfemail,
        api_key: params.cfapikey,
    };

    let families = [
        (&params.ipv4, AddressFamily::V4),
        (&params.ipv6, AddressFamily::V6),
    ];

    let mut lines = Vec::new();
    let mut failed = false;

    // Sequential by design: each family runs its full sequence to
    // completion. A failure is terminal for its family only, and an
    // earlier family's successful update is never rolled back.
    for (address, family) in families {
        if address.is_empty() {
            continue;
        }

        match state
            .engine
            .update_address(address, family, &name, &credentials)
            .await
        {
            Ok(UpdateOutcome::Updated) => lines.push(format!("{}: updated", family)),
            Ok(UpdateOutcome::Skipped) => lines.push(format!("{}: already current", family)),
            Err(e) => {
                warn!("{} update for {} failed: {}", family, name.fqdn(), e);
                lines.push(format!("{}: {}", family, e));
                failed = true;
            }
        }
    }

    if lines.is_empty() {
        lines.push("nothing to do".to_string());
    }

    let status = if failed {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, lines.join("\n") + "\n")
}
