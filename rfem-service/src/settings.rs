//! Environment settings shared by the service and the batch binaries

use std::path::Path;
use std::time::Duration;

use mast_model::prelude::{BuildResult, BuilderConfig};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8081";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;

/// Base URL of the model gateway in front of the FEA application
pub fn resolve_gateway_url() -> String {
    std::env::var("RFEM_GATEWAY_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string())
}

/// Per-request timeout for gateway calls, `RFEM_GATEWAY_TIMEOUT_SECS`
pub fn resolve_gateway_timeout() -> Duration {
    let secs = match std::env::var("RFEM_GATEWAY_TIMEOUT_SECS") {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Ignoring invalid RFEM_GATEWAY_TIMEOUT_SECS={}, using {}s",
                value,
                DEFAULT_GATEWAY_TIMEOUT_SECS
            );
            DEFAULT_GATEWAY_TIMEOUT_SECS
        }),
        Err(_) => DEFAULT_GATEWAY_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}

/// Address the HTTP service binds to
pub fn resolve_bind_addr() -> String {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8085".to_string());
    format!("{}:{}", host, port)
}

/// Builder configuration from `MAST_BUILDER_CONFIG`, or `fallback` when unset
pub fn load_builder_config(fallback: BuilderConfig) -> BuildResult<BuilderConfig> {
    match std::env::var("MAST_BUILDER_CONFIG") {
        Ok(path) if !path.is_empty() => {
            tracing::info!("Loading builder configuration from {}", path);
            BuilderConfig::load(Path::new(&path))
        }
        _ => Ok(fallback),
    }
}
