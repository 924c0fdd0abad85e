use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use url::Url;

pub const API_URL_ENV: &str = "YTDL_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub download_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let base = std::env::var(API_URL_ENV).ok();
        Self::new(base.as_deref(), default_download_dir())
    }

    pub fn new(api_base_url: Option<&str>, download_dir: PathBuf) -> Result<Self> {
        let raw = api_base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let parsed = Url::parse(raw).with_context(|| format!("invalid {API_URL_ENV}: {raw}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("{API_URL_ENV} must be an http or https URL, got {raw}");
        }

        Ok(Self {
            api_base_url: raw.trim_end_matches('/').to_string(),
            download_dir,
        })
    }

    pub fn download_endpoint(&self) -> String {
        format!("{}/download", self.api_base_url)
    }

    pub fn health_endpoint(&self) -> String {
        format!("{}/health", self.api_base_url)
    }
}

pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
}
