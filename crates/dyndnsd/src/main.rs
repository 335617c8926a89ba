// # dyndnsd - dynamic-DNS trigger daemon
//
// Thin integration layer only:
// 1. Read configuration from environment variables
// 2. Initialize tracing
// 3. Construct the provider client, cache, event log, and engine
// 4. Serve the HTTP trigger endpoint until shutdown
//
// All update logic lives in dyndns-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `DYNDNS_BIND_ADDR`: listen address (default 0.0.0.0:8053)
// - `DYNDNS_AUTH_USERNAME` / `DYNDNS_AUTH_PASSWORD`: trigger credentials
// - `DYNDNS_REQUIRE_AUTH`: check trigger credentials (default true)
// - `DYNDNS_CACHE_ENABLED`: skip updates for cached addresses (default true)
// - `DYNDNS_CACHE_DIR`: cache directory (default /var/lib/dyndns)
// - `DYNDNS_LOG_ENABLED`: per-record event log (default true)
// - `DYNDNS_LOG_DIR`: event log directory (default /var/lib/dyndns)
// - `DYNDNS_LOG_MIN_LEVEL`: event log threshold (default info)
// - `DYNDNS_API_BASE`: Cloudflare API base override
// - `DYNDNS_LOG_LEVEL`: tracing filter (default info)
//
// ## Example
//
// ```bash
// export DYNDNS_AUTH_USERNAME=sunshine
// export DYNDNS_AUTH_PASSWORD=change-me
// export DYNDNS_CACHE_DIR=/var/lib/dyndns
//
// dyndnsd
// ```

use anyhow::Result;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::config::{AuthConfig, CacheConfig, LogConfig, UpdaterConfig};
use dyndns_core::{FileAddressCache, Severity, UpdateEngine, UpdateLog};
use dyndns_provider_cloudflare::CloudflareClient;

use dyndnsd::server::{self, AppState};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn config_from_env() -> Result<(UpdaterConfig, String, Option<String>)> {
    let config = UpdaterConfig {
        auth: AuthConfig {
            required: env_flag("DYNDNS_REQUIRE_AUTH", true),
            username: env_or("DYNDNS_AUTH_USERNAME", ""),
            password: env_or("DYNDNS_AUTH_PASSWORD", ""),
        },
        cache: CacheConfig {
            enabled: env_flag("DYNDNS_CACHE_ENABLED", true),
            dir: env_or("DYNDNS_CACHE_DIR", "/var/lib/dyndns").into(),
        },
        log: LogConfig {
            enabled: env_flag("DYNDNS_LOG_ENABLED", true),
            min_level: env_or("DYNDNS_LOG_MIN_LEVEL", "info").parse::<Severity>()?,
            dir: env_or("DYNDNS_LOG_DIR", "/var/lib/dyndns").into(),
        },
    };
    config.validate()?;

    let bind_addr = env_or("DYNDNS_BIND_ADDR", "0.0.0.0:8053");
    let api_base = env::var("DYNDNS_API_BASE").ok();

    Ok((config, bind_addr, api_base))
}

async fn serve(config: UpdaterConfig, bind_addr: String, api_base: Option<String>) -> Result<()> {
    if config.log.enabled {
        tokio::fs::create_dir_all(&config.log.dir).await?;
    }

    let provider = match &api_base {
        Some(base) => CloudflareClient::with_base_url(base),
        None => CloudflareClient::new(),
    };
    let cache = FileAddressCache::new(config.cache.clone()).await?;
    let log = UpdateLog::new(config.log.clone());
    let engine = UpdateEngine::new(Box::new(provider), Box::new(cache), log);

    let state = AppState {
        engine: Arc::new(engine),
        auth: config.auth,
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", bind_addr);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let level = env_or("DYNDNS_LOG_LEVEL", "info")
        .parse::<Level>()
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install tracing subscriber");
    }

    let (config, bind_addr, api_base) = match config_from_env() {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("configuration error: {:#}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    match serve(config, bind_addr, api_base).await {
        Ok(()) => {
            info!("clean shutdown");
            DaemonExitCode::CleanShutdown.into()
        }
        Err(e) => {
            error!("runtime error: {:#}", e);
            DaemonExitCode::RuntimeError.into()
        }
    }
}
