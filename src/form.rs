use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use log::{info, warn};

use crate::config::default_download_dir;
use crate::download::{start_download, DownloadBackend};
use crate::error::FormError;
use crate::localizations::Localizations;
use crate::models::{
    DownloadFormat, DownloadOutcome, DownloadRequest, FormState, MessageKind, QualityCatalog,
};
use crate::validation::validate_url;

/// The download form: owns the input state and at most one in-flight
/// submission.
pub struct DownloadForm {
    pub state: FormState,
    pub download_dir: String,
    pub last_saved: Option<PathBuf>,
    localizer: Localizations,
    backend: Arc<dyn DownloadBackend>,
    pending: Option<Receiver<DownloadOutcome>>,
}

impl DownloadForm {
    pub fn new(
        backend: Arc<dyn DownloadBackend>,
        localizer: Localizations,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            state: FormState::default(),
            download_dir: download_dir.to_string_lossy().to_string(),
            last_saved: None,
            localizer,
            backend,
            pending: None,
        }
    }

    pub fn localizer(&self) -> &Localizations {
        &self.localizer
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn set_url(&mut self, value: impl Into<String>) {
        if self.state.is_loading {
            return;
        }
        self.state.url = value.into();
        self.state.clear_message();
    }

    pub fn set_format(&mut self, format: DownloadFormat) {
        if self.state.is_loading {
            return;
        }
        self.state.format = format;
        self.state.quality = QualityCatalog::default_quality(format).to_string();
    }

    /// Returns false when `key` is not a tier of the current format.
    pub fn set_quality(&mut self, key: &str) -> bool {
        if self.state.is_loading || !QualityCatalog::contains(self.state.format, key) {
            return false;
        }
        self.state.quality = key.to_string();
        true
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading && !self.state.url.trim().is_empty()
    }

    pub fn submit_label(&self) -> String {
        if self.state.is_loading {
            return self.localizer.tr("status-downloading");
        }
        let quality = QualityCatalog::label(self.state.format, &self.state.quality)
            .unwrap_or(self.state.quality.as_str());
        format!(
            "{} {} ({})",
            self.localizer.tr("download-button"),
            self.state.format.extension().to_uppercase(),
            quality
        )
    }

    /// Validates the input and, if it passes, hands one request to a worker.
    pub fn submit(&mut self) {
        if self.state.is_loading {
            return;
        }

        if let Err(e) = validate_url(&self.state.url) {
            self.fail(FormError::from(e));
            return;
        }

        let request = DownloadRequest {
            url: self.state.url.trim().to_string(),
            format: self.state.format,
            quality: self.state.quality.clone(),
        };

        self.state.is_loading = true;
        self.state.clear_message();
        self.last_saved = None;

        let download_dir = self.resolve_download_dir();
        let (tx, rx) = mpsc::channel();
        self.pending = Some(rx);
        start_download(Arc::clone(&self.backend), request, download_dir, tx);
    }

    /// A cleared directory field falls back to the default download folder
    /// rather than the process's working directory.
    fn resolve_download_dir(&mut self) -> PathBuf {
        let trimmed = self.download_dir.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }

        let dir = default_download_dir();
        warn!("No download directory set, using {}", dir.display());
        self.download_dir = dir.to_string_lossy().to_string();
        dir
    }

    /// Applies a finished submission, if any. Returns true when state changed.
    pub fn poll(&mut self) -> bool {
        let outcome = match &self.pending {
            Some(rx) => match rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    warn!("Download worker exited without reporting");
                    DownloadOutcome::Failed(FormError::Interrupted)
                }
            },
            None => return false,
        };

        self.finish(outcome);
        true
    }

    fn finish(&mut self, outcome: DownloadOutcome) {
        self.pending = None;
        self.state.is_loading = false;

        match outcome {
            DownloadOutcome::Saved(path) => {
                info!("Download complete: {}", path.display());
                self.state
                    .set_message(MessageKind::Success, self.localizer.tr("download-success"));
                self.last_saved = Some(path);
            }
            DownloadOutcome::Failed(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: FormError) {
        if !matches!(error, FormError::Validation(_)) {
            warn!("Submission failed: {}", error);
        }
        self.state
            .set_message(MessageKind::Error, self.localizer.tr(error.message_key()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DownloadedFile;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};
    use tempfile::{tempdir, TempDir};
    use unic_langid::langid;

    enum Reply {
        File(&'static str, &'static [u8]),
        Server(u16),
        Network,
        Vanish,
    }

    /// A real transport error: a request to a port nobody listens on.
    fn connection_refused() -> FormError {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = reqwest::blocking::get(format!("http://127.0.0.1:{port}")).unwrap_err();
        FormError::from(err)
    }

    struct FakeBackend {
        reply: Reply,
        calls: AtomicUsize,
        requests: Mutex<Vec<DownloadRequest>>,
        gate: Mutex<Option<mpsc::Receiver<()>>>,
    }

    impl FakeBackend {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
                gate: Mutex::new(None),
            })
        }

        /// Fetches block until the returned sender fires.
        fn gated(reply: Reply) -> (Arc<Self>, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let backend = Self::new(reply);
            *backend.gate.lock().unwrap() = Some(rx);
            (backend, tx)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DownloadBackend for FakeBackend {
        fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedFile, FormError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = self.gate.lock().unwrap().take() {
                let _ = gate.recv();
            }
            match &self.reply {
                Reply::File(name, body) => Ok(DownloadedFile {
                    filename: name.to_string(),
                    body: Bytes::from_static(*body),
                }),
                Reply::Server(status) => Err(FormError::Server {
                    status: *status,
                    body: "diagnostic detail".to_string(),
                }),
                Reply::Network => Err(connection_refused()),
                // Unwinds the worker before it can report anything.
                Reply::Vanish => panic!("worker died"),
            }
        }
    }

    fn form_with(backend: Arc<FakeBackend>) -> (DownloadForm, TempDir) {
        let dir = tempdir().unwrap();
        let form = DownloadForm::new(
            backend,
            Localizations::with_language(&langid!("en-US")),
            dir.path().to_path_buf(),
        );
        (form, dir)
    }

    impl DownloadForm {
        fn wait(&mut self) {
            let deadline = Instant::now() + Duration::from_secs(5);
            while !self.poll() {
                assert!(Instant::now() < deadline, "download never finished");
                thread::sleep(Duration::from_millis(5));
            }
        }
    }

    #[test]
    fn empty_url_never_reaches_the_backend() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b""));
        let (mut form, _dir) = form_with(backend.clone());

        form.set_url("");
        form.submit();

        assert!(!form.is_loading());
        assert_eq!(form.state.message_kind, MessageKind::Error);
        assert_eq!(form.state.message, "Please enter a YouTube URL");
        assert!(!form.poll());
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn malformed_urls_never_reach_the_backend() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b""));
        let (mut form, _dir) = form_with(backend.clone());

        for url in ["hello", "https://vimeo.com/1", "youtube.com/", "   "] {
            form.set_url(url);
            form.submit();
            assert!(!form.is_loading());
            assert_eq!(form.state.message_kind, MessageKind::Error);
        }
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn editing_the_url_clears_the_message() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b""));
        let (mut form, _dir) = form_with(backend);

        form.submit();
        assert_eq!(form.state.message_kind, MessageKind::Error);

        form.set_url("https://youtu.be/");
        assert_eq!(form.state.message_kind, MessageKind::None);
        assert!(form.state.message.is_empty());
    }

    #[test]
    fn switching_format_resets_quality() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b""));
        let (mut form, _dir) = form_with(backend);

        assert!(form.set_quality("2160p"));
        form.set_format(DownloadFormat::Mp3);
        assert_eq!(form.state.quality, "high");

        assert!(form.set_quality("low"));
        form.set_format(DownloadFormat::Mp3);
        assert_eq!(form.state.quality, "high");

        form.set_format(DownloadFormat::Mp4);
        assert_eq!(form.state.quality, "1080p");
    }

    #[test]
    fn quality_must_belong_to_the_current_format() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b""));
        let (mut form, _dir) = form_with(backend);

        assert!(!form.set_quality("highest"));
        assert_eq!(form.state.quality, "1080p");

        form.set_format(DownloadFormat::Mp3);
        assert!(!form.set_quality("720p"));
        assert!(form.set_quality("highest"));
    }

    #[test]
    fn successful_download_saves_default_name() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b"mp4 bytes"));
        let (mut form, dir) = form_with(backend.clone());

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.set_quality("1080p");
        form.submit();
        assert!(form.is_loading());
        form.wait();

        assert!(!form.is_loading());
        assert_eq!(form.state.message_kind, MessageKind::Success);
        assert_eq!(form.state.message, "Download completed successfully!");
        let saved = form.last_saved.clone().unwrap();
        assert_eq!(saved, dir.path().join("video.mp4"));
        assert_eq!(std::fs::read(saved).unwrap(), b"mp4 bytes");

        let sent = backend.requests.lock().unwrap();
        assert_eq!(
            *sent,
            vec![DownloadRequest {
                url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                format: DownloadFormat::Mp4,
                quality: "1080p".to_string(),
            }]
        );
    }

    #[test]
    fn audio_submissions_carry_audio_tiers() {
        let backend = FakeBackend::new(Reply::File("clip.mp3", b"id3"));
        let (mut form, dir) = form_with(backend.clone());

        form.set_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        form.set_format(DownloadFormat::Mp3);
        form.set_quality("highest");
        form.submit();
        form.wait();

        assert_eq!(form.last_saved, Some(dir.path().join("clip.mp3")));
        let sent = backend.requests.lock().unwrap();
        assert_eq!(sent[0].format, DownloadFormat::Mp3);
        assert_eq!(sent[0].quality, "highest");
    }

    #[test]
    fn server_failure_saves_nothing() {
        let backend = FakeBackend::new(Reply::Server(500));
        let (mut form, dir) = form_with(backend);

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        form.wait();

        assert!(!form.is_loading());
        assert_eq!(form.state.message_kind, MessageKind::Error);
        assert!(!form.state.message.contains("diagnostic detail"));
        assert!(form.last_saved.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn submit_while_loading_is_a_no_op() {
        let (backend, release) = FakeBackend::gated(Reply::File("video.mp4", b"x"));
        let (mut form, _dir) = form_with(backend.clone());

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        assert!(form.is_loading());
        assert!(!form.can_submit());

        form.submit();
        form.set_format(DownloadFormat::Mp3);
        form.set_url("https://youtu.be/other");
        assert_eq!(form.state.format, DownloadFormat::Mp4);
        assert_eq!(form.state.url, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(form.submit_label(), "Downloading...");

        release.send(()).unwrap();
        form.wait();

        assert_eq!(backend.calls(), 1);
        assert!(!form.is_loading());
        assert!(form.can_submit());
    }

    #[test]
    fn form_is_usable_again_after_a_failure() {
        let backend = FakeBackend::new(Reply::Server(502));
        let (mut form, _dir) = form_with(backend.clone());

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        form.wait();
        form.submit();
        form.wait();

        assert_eq!(backend.calls(), 2);
        assert_eq!(form.state.message_kind, MessageKind::Error);
    }

    #[test]
    fn submit_label_shows_format_and_tier() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b""));
        let (mut form, _dir) = form_with(backend);

        assert_eq!(form.submit_label(), "Download MP4 (Full HD 1080p)");
        form.set_format(DownloadFormat::Mp3);
        assert_eq!(form.submit_label(), "Download MP3 (192 kbps)");
    }

    #[test]
    fn network_failure_shows_generic_message_and_recovers() {
        let backend = FakeBackend::new(Reply::Network);
        let (mut form, dir) = form_with(backend.clone());

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        form.wait();

        assert!(!form.is_loading());
        assert_eq!(form.state.message_kind, MessageKind::Error);
        assert_eq!(
            form.state.message,
            "Could not reach the download service. Check your connection and try again."
        );
        assert!(form.last_saved.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        assert!(form.can_submit());
        form.submit();
        form.wait();
        assert_eq!(backend.calls(), 2);
    }

    #[test]
    fn unwritable_directory_reports_save_failure() {
        let backend = FakeBackend::new(Reply::File("video.mp4", b"x"));
        let (mut form, dir) = form_with(backend);
        let not_a_dir = dir.path().join("occupied");
        std::fs::write(&not_a_dir, b"plain file").unwrap();
        form.download_dir = not_a_dir.to_string_lossy().to_string();

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        form.wait();

        assert!(!form.is_loading());
        assert_eq!(form.state.message_kind, MessageKind::Error);
        assert_eq!(
            form.state.message,
            "The download finished but the file could not be saved."
        );
        assert!(form.last_saved.is_none());
    }

    #[test]
    fn lost_worker_clears_loading() {
        let backend = FakeBackend::new(Reply::Vanish);
        let (mut form, _dir) = form_with(backend.clone());

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        form.wait();

        assert!(!form.is_loading());
        assert_eq!(form.state.message_kind, MessageKind::Error);
        assert_eq!(
            form.state.message,
            "Could not reach the download service. Check your connection and try again."
        );
        assert!(form.can_submit());
    }

    #[test]
    fn blank_directory_falls_back_to_default() {
        let backend = FakeBackend::new(Reply::Server(500));
        let (mut form, _dir) = form_with(backend);
        form.download_dir = "   ".to_string();

        form.set_url("https://youtu.be/dQw4w9WgXcQ");
        form.submit();
        form.wait();

        assert_eq!(
            form.download_dir,
            default_download_dir().to_string_lossy().to_string()
        );
    }
}
