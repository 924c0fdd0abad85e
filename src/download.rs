use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION};

use crate::config::AppConfig;
use crate::error::FormError;
use crate::models::{BackendStatus, DownloadFormat, DownloadOutcome, DownloadRequest, DownloadedFile};
use crate::save::save_file;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that can turn a request into a downloaded file.
pub trait DownloadBackend: Send + Sync {
    fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedFile, FormError>;
}

pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self> {
        // Conversions can take minutes, leave timing out to the network stack.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.download_endpoint(),
        })
    }
}

impl DownloadBackend for HttpBackend {
    fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedFile, FormError> {
        debug!("POST {} {:?}", self.endpoint, request);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/octet-stream")
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|e| {
                debug!("Could not read error body for {}: {}", status, e);
                String::new()
            });
            return Err(FormError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let filename = filename_from_disposition(disposition.as_deref(), request.format);
        let body = response.bytes()?;

        Ok(DownloadedFile { filename, body })
    }
}

fn disposition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"filename="([^"]+)""#).expect("disposition pattern is valid"))
}

/// Picks the file name out of a `content-disposition` header, falling back
/// to `video.<ext>` for the requested format.
pub fn filename_from_disposition(header: Option<&str>, format: DownloadFormat) -> String {
    header
        .and_then(|value| disposition_regex().captures(value))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| format.default_filename())
}

/// Runs one submission on a worker thread: fetch, save, then report exactly
/// one outcome back to the UI.
pub fn start_download(
    backend: Arc<dyn DownloadBackend>,
    request: DownloadRequest,
    download_dir: PathBuf,
    tx: Sender<DownloadOutcome>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!(
            "Requesting {} ({}) for {}",
            request.format, request.quality, request.url
        );

        let outcome = match backend
            .fetch(&request)
            .and_then(|file| save_file(&download_dir, &file).map_err(FormError::from))
        {
            Ok(path) => {
                info!("Saved download to {}", path.display());
                DownloadOutcome::Saved(path)
            }
            Err(e) => {
                warn!("Download failed: {}", e);
                DownloadOutcome::Failed(e)
            }
        };

        if tx.send(outcome).is_err() {
            warn!("Form went away before the download finished");
        }
    })
}

/// Probes the service's health endpoint once in the background.
pub fn check_health(config: &AppConfig, tx: Sender<BackendStatus>) -> thread::JoinHandle<()> {
    let endpoint = config.health_endpoint();
    thread::spawn(move || {
        let status = match Client::builder()
            .timeout(HEALTH_TIMEOUT)
            .build()
            .and_then(|client| client.get(&endpoint).send())
        {
            Ok(response) if response.status().is_success() => BackendStatus::Reachable,
            Ok(response) => {
                warn!("Health check returned {}", response.status());
                BackendStatus::Unreachable
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                BackendStatus::Unreachable
            }
        };
        info!("Download service at {} is {:?}", endpoint, status);
        let _ = tx.send(status);
    })
}
