use std::collections::HashMap;

use i18n_embed::DesktopLanguageRequester;
use unic_langid::{langid, LanguageIdentifier};

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<LanguageIdentifier, Translations>,
    current_lang: LanguageIdentifier,
}

impl Default for Localizations {
    fn default() -> Self {
        Self::new()
    }
}

fn english() -> Translations {
    let mut en = Translations::new();
    en.insert("app-title", "YouTube Downloader");
    en.insert("app-subtitle", "Download YouTube videos as MP3 or MP4");
    en.insert("url-label", "YouTube video URL");
    en.insert("url-placeholder", "https://www.youtube.com/watch?v=...");
    en.insert("format-label", "Download format");
    en.insert("format-mp4", "MP4 (Video)");
    en.insert("format-mp3", "MP3 (Audio only)");
    en.insert("quality-audio", "Audio quality");
    en.insert("quality-video", "Video quality");
    en.insert("download-to", "Save to:");
    en.insert("download-dir-placeholder", "Select download directory");
    en.insert("browse-button", "Browse...");
    en.insert("download-button", "Download");
    en.insert("status-downloading", "Downloading...");
    en.insert("download-success", "Download completed successfully!");
    en.insert("saved-to", "Saved to:");
    en.insert("error-empty-url", "Please enter a YouTube URL");
    en.insert("error-invalid-url", "Please enter a valid YouTube URL");
    en.insert(
        "error-download-failed",
        "Could not download the video. Check the URL and try again.",
    );
    en.insert(
        "error-network",
        "Could not reach the download service. Check your connection and try again.",
    );
    en.insert("error-save-failed", "The download finished but the file could not be saved.");
    en.insert("backend-unknown", "Checking download service...");
    en.insert("backend-reachable", "Download service is online");
    en.insert("backend-unreachable", "Download service is not responding");
    en.insert("instructions-title", "How to use");
    en.insert("instructions-1", "Copy the URL of the YouTube video you want to download");
    en.insert("instructions-2", "Paste it into the URL field above");
    en.insert("instructions-3", "Pick the format (MP4 for video, MP3 for audio) and quality");
    en.insert("instructions-4", "Click \"Download\" and wait for it to finish");
    en.insert("footer-note", "Respect copyright and YouTube's terms of service");
    en
}

fn spanish() -> Translations {
    let mut es = Translations::new();
    es.insert("app-title", "Descargador de YouTube");
    es.insert("app-subtitle", "Descarga videos de YouTube en formato MP3 o MP4");
    es.insert("url-label", "URL del video de YouTube");
    es.insert("format-label", "Formato de descarga");
    es.insert("format-mp4", "MP4 (Video)");
    es.insert("format-mp3", "MP3 (Solo audio)");
    es.insert("quality-audio", "Calidad de audio");
    es.insert("quality-video", "Calidad de video");
    es.insert("download-to", "Guardar en:");
    es.insert("download-dir-placeholder", "Seleccione la carpeta de descarga");
    es.insert("browse-button", "Examinar...");
    es.insert("download-button", "Descargar");
    es.insert("status-downloading", "Descargando...");
    es.insert("download-success", "¡Descarga completada exitosamente!");
    es.insert("saved-to", "Guardado en:");
    es.insert("error-empty-url", "Por favor, ingresa una URL de YouTube");
    es.insert("error-invalid-url", "Por favor, ingresa una URL válida de YouTube");
    es.insert(
        "error-download-failed",
        "Error al descargar el video. Verifica la URL e intenta nuevamente.",
    );
    es.insert(
        "error-network",
        "No se pudo contactar el servicio de descarga. Verifica tu conexión e intenta nuevamente.",
    );
    es.insert(
        "error-save-failed",
        "La descarga terminó pero no se pudo guardar el archivo.",
    );
    es.insert("backend-unknown", "Comprobando el servicio de descarga...");
    es.insert("backend-reachable", "El servicio de descarga está en línea");
    es.insert("backend-unreachable", "El servicio de descarga no responde");
    es.insert("instructions-title", "Instrucciones");
    es.insert("instructions-1", "Copia la URL del video de YouTube que deseas descargar");
    es.insert("instructions-2", "Pégala en el campo de URL arriba");
    es.insert(
        "instructions-3",
        "Selecciona el formato deseado (MP4 para video o MP3 para audio) y la calidad",
    );
    es.insert(
        "instructions-4",
        "Haz clic en \"Descargar\" y espera a que se complete la descarga",
    );
    es.insert("footer-note", "Respeta los derechos de autor y las políticas de YouTube");
    es
}

impl Localizations {
    /// Picks the first supported language the desktop asks for.
    pub fn new() -> Self {
        let requested = DesktopLanguageRequester::requested_languages();
        let mut localizer = Self::with_language(&langid!("en-US"));
        if let Some(lang) = requested.iter().find(|l| localizer.supports(l)) {
            localizer.select(lang);
        }
        localizer
    }

    pub fn with_language(lang: &LanguageIdentifier) -> Self {
        let mut translations = HashMap::new();
        translations.insert(langid!("en-US"), english());
        translations.insert(langid!("es-ES"), spanish());

        let mut localizer = Self {
            translations,
            current_lang: langid!("en-US"),
        };
        localizer.select(lang);
        localizer
    }

    pub fn current_language(&self) -> &LanguageIdentifier {
        &self.current_lang
    }

    fn supports(&self, lang: &LanguageIdentifier) -> bool {
        self.translations
            .keys()
            .any(|key| key.language == lang.language)
    }

    /// Exact match first, then any table with the same language subtag,
    /// otherwise English.
    pub fn select(&mut self, lang: &LanguageIdentifier) {
        if self.translations.contains_key(lang) {
            self.current_lang = lang.clone();
            return;
        }

        self.current_lang = self
            .translations
            .keys()
            .find(|key| key.language == lang.language)
            .cloned()
            .unwrap_or_else(|| langid!("en-US"));
    }

    pub fn lookup_single_language(&self, key: &str) -> Option<String> {
        self.translations
            .get(&self.current_lang)
            .and_then(|t| t.lookup(key))
            .or_else(|| {
                // Fallback to English if the current language doesn't have the key
                self.translations
                    .get(&langid!("en-US"))
                    .and_then(|t| t.lookup(key))
            })
            .map(|s| s.to_string())
    }

    /// Translated text, or the key itself when no table has it.
    pub fn tr(&self, key: &str) -> String {
        self.lookup_single_language(key)
            .unwrap_or_else(|| key.to_string())
    }
}
