use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no URL provided")]
    Empty,
    #[error("URL does not look like a video link")]
    Malformed,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("server responded with {status}: {body}")]
    Server { status: u16, body: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("could not save file: {0}")]
    Save(#[from] std::io::Error),
    #[error("download worker exited without reporting")]
    Interrupted,
}

impl FormError {
    /// Localization key of the message shown to the user. Server details
    /// stay out of it and only reach the log.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::Empty) => "error-empty-url",
            Self::Validation(ValidationError::Malformed) => "error-invalid-url",
            Self::Server { .. } => "error-download-failed",
            Self::Network(_) | Self::Interrupted => "error-network",
            Self::Save(_) => "error-save-failed",
        }
    }
}
