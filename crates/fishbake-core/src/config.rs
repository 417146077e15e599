use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry parameters for each HTTP GET (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Fixed pause between attempts in seconds.
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 1.0,
        }
    }
}

/// Global configuration loaded from `~/.config/fishbake/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishbakeConfig {
    /// Dataset file rewritten in place (relative paths resolve against the working dir).
    pub data_path: PathBuf,
    /// Text that introduces the embedded array, e.g. `const FISH` or `var FISH`.
    pub binding: String,
    /// Base URL of the page summary endpoint; the encoded title is appended.
    pub summary_endpoint: String,
    /// Base URL of the page media-list endpoint; the encoded title is appended.
    pub media_list_endpoint: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Pixel width substituted into `/NNpx-` thumbnail path segments.
    pub thumbnail_width: u32,
    /// Records per progress/throttle batch. Requests stay sequential.
    pub batch_size: usize,
    /// Pause between batches in milliseconds.
    pub batch_delay_ms: u64,
    /// Total timeout per request in seconds.
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for FishbakeConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("js/fish-data.js"),
            binding: "const FISH".to_string(),
            summary_endpoint: "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string(),
            media_list_endpoint: "https://en.wikipedia.org/api/rest_v1/page/media-list/"
                .to_string(),
            user_agent: "fishbake/0.1 (offline dataset enrichment)".to_string(),
            thumbnail_width: 480,
            batch_size: 4,
            batch_delay_ms: 250,
            request_timeout_secs: 10,
            retry: None,
        }
    }
}

impl FishbakeConfig {
    /// Rejects values that would make a run meaningless or unreachable.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be at least 1");
        }
        if self.thumbnail_width == 0 {
            anyhow::bail!("thumbnail_width must be at least 1");
        }
        if self.binding.trim().is_empty() {
            anyhow::bail!("binding must not be empty");
        }
        for (name, endpoint) in [
            ("summary_endpoint", &self.summary_endpoint),
            ("media_list_endpoint", &self.media_list_endpoint),
        ] {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| anyhow::anyhow!("{} is not a valid URL ({}): {}", name, e, endpoint))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("{} must be http or https: {}", name, endpoint);
            }
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let retry = self.retry.clone().unwrap_or_default();
        RetryPolicy {
            max_attempts: retry.max_attempts.max(1),
            delay: Duration::from_secs_f64(retry.delay_secs.max(0.0)),
        }
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fishbake")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FishbakeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FishbakeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FishbakeConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
