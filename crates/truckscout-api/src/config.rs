//! Server configuration from environment variables.

use std::path::PathBuf;

use axum::http::HeaderValue;

use truckscout_core::defaults;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub image_root: PathBuf,
    /// Passed through to the map view for the tile provider.
    pub mapbox_token: Option<String>,
    pub word_delay_ms: u64,
    pub outreach_sender: String,
    pub max_body_bytes: usize,
    /// Idle sessions older than this are discarded.
    pub session_ttl_secs: u64,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: defaults::PORT,
            dataset_path: PathBuf::from(defaults::DATASET_PATH),
            image_root: PathBuf::from(defaults::IMAGE_ROOT),
            mapbox_token: None,
            word_delay_ms: defaults::WORD_DELAY_MS,
            outreach_sender: defaults::OUTREACH_SENDER.to_string(),
            max_body_bytes: defaults::MAX_BODY_BYTES,
            session_ttl_secs: defaults::SESSION_TTL_SECS,
            allowed_origins: parse_allowed_origins(""),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment. Unparseable numbers fall back to defaults.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(base.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(base.port),
            dataset_path: std::env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(base.dataset_path),
            image_root: std::env::var("IMAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(base.image_root),
            mapbox_token: std::env::var("MAPBOX_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            word_delay_ms: std::env::var("WORD_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(base.word_delay_ms),
            outreach_sender: std::env::var("OUTREACH_SENDER").unwrap_or(base.outreach_sender),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(base.max_body_bytes),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(base.session_ttl_secs),
            allowed_origins: parse_allowed_origins(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_default(),
            ),
        }
    }
}

/// Parse a comma-separated CORS origin list. Blank input gives the default.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    if origins.trim().is_empty() {
        return vec![HeaderValue::from_static("http://localhost:3000")];
    }

    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
