use std::env;
use std::path::PathBuf;
use std::time::Duration;

use youtube_client::{ClientConfig, DEFAULT_BASE_URL};

use crate::enrichment::EnrichConfig;
use crate::error::{HarvestError, Result};

pub const DEFAULT_CATALOG_PATH: &str = "videos.json";

/// Harvester configuration loaded from environment variables.
///
/// Command-line flags override these per run; see `main.rs`.
#[derive(Clone)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub youtube_api_base: String,
    pub catalog_path: PathBuf,
    pub comment_concurrency: usize,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            youtube_api_base: DEFAULT_BASE_URL.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            comment_concurrency: EnrichConfig::default().comment_concurrency,
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            youtube_api_key: lookup("YOUTUBE_API_KEY").filter(|k| !k.trim().is_empty()),
            youtube_api_base: lookup("YOUTUBE_API_BASE").unwrap_or(defaults.youtube_api_base),
            catalog_path: lookup("VIDEO_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            comment_concurrency: parse_var(&lookup, "COMMENT_CONCURRENCY")?
                .unwrap_or(defaults.comment_concurrency),
            http_timeout_secs: parse_var(&lookup, "HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.http_timeout_secs),
        })
    }

    /// The API key, or a configuration error naming where to set it.
    pub fn require_api_key(&self) -> Result<&str> {
        self.youtube_api_key.as_deref().ok_or_else(|| {
            HarvestError::Config(
                "a YouTube Data API key is required (--api-key or YOUTUBE_API_KEY)".to_string(),
            )
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.youtube_api_base.clone(),
            timeout: Duration::from_secs(self.http_timeout_secs),
        }
    }

    pub fn enrich_config(&self) -> EnrichConfig {
        EnrichConfig {
            comment_concurrency: self.comment_concurrency.max(1),
            ..EnrichConfig::default()
        }
    }

    /// Log the effective configuration with the API key redacted.
    pub fn log_redacted(&self) {
        let key_state = if self.youtube_api_key.is_some() { "<set>" } else { "<unset>" };
        tracing::info!(
            youtube_api_key = key_state,
            youtube_api_base = %self.youtube_api_base,
            catalog_path = %self.catalog_path.display(),
            comment_concurrency = self.comment_concurrency,
            http_timeout_secs = self.http_timeout_secs,
            "Config loaded"
        );
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("youtube_api_key", &self.youtube_api_key.as_ref().map(|_| "<redacted>"))
            .field("youtube_api_base", &self.youtube_api_base)
            .field("catalog_path", &self.catalog_path)
            .field("comment_concurrency", &self.comment_concurrency)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| HarvestError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(None),
    }
}
