use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;

use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Mp3,
    Mp4,
}

impl Default for DownloadFormat {
    fn default() -> Self {
        Self::Mp4
    }
}

impl DownloadFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Mp4 => "mp4",
        }
    }

    pub fn default_filename(self) -> String {
        format!("video.{}", self.extension())
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Quality tiers offered per format, in display order. The key is what the
/// service receives, the label is only shown to the user.
pub struct QualityCatalog;

const AUDIO_QUALITIES: &[(&str, &str)] = &[
    ("low", "96 kbps"),
    ("medium", "128 kbps"),
    ("high", "192 kbps"),
    ("highest", "320 kbps"),
];

const VIDEO_QUALITIES: &[(&str, &str)] = &[
    ("720p", "HD 720p"),
    ("1080p", "Full HD 1080p"),
    ("1440p", "2K 1440p"),
    ("2160p", "4K 2160p"),
];

impl QualityCatalog {
    pub fn options(format: DownloadFormat) -> &'static [(&'static str, &'static str)] {
        match format {
            DownloadFormat::Mp3 => AUDIO_QUALITIES,
            DownloadFormat::Mp4 => VIDEO_QUALITIES,
        }
    }

    pub fn default_quality(format: DownloadFormat) -> &'static str {
        match format {
            DownloadFormat::Mp3 => "high",
            DownloadFormat::Mp4 => "1080p",
        }
    }

    pub fn label(format: DownloadFormat, key: &str) -> Option<&'static str> {
        Self::options(format)
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, label)| *label)
    }

    pub fn contains(format: DownloadFormat, key: &str) -> bool {
        Self::label(format, key).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    None,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub url: String,
    pub format: DownloadFormat,
    pub quality: String,
    pub is_loading: bool,
    pub message: String,
    pub message_kind: MessageKind,
}

impl Default for FormState {
    fn default() -> Self {
        let format = DownloadFormat::default();
        Self {
            url: String::new(),
            format,
            quality: QualityCatalog::default_quality(format).to_string(),
            is_loading: false,
            message: String::new(),
            message_kind: MessageKind::None,
        }
    }
}

impl FormState {
    pub fn clear_message(&mut self) {
        self.message.clear();
        self.message_kind = MessageKind::None;
    }

    pub fn set_message(&mut self, kind: MessageKind, message: String) {
        self.message = message;
        self.message_kind = kind;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub format: DownloadFormat,
    pub quality: String,
}

#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub filename: String,
    pub body: Bytes,
}

/// What the worker thread reports back once a submission is finished.
#[derive(Debug)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    Failed(FormError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}
