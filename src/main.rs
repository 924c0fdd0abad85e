use anyhow::anyhow;
use eframe::egui;
use log::debug;

mod app;
mod config;
mod download;
mod error;
mod form;
mod localizations;
mod models;
mod save;
mod theme;
mod ui;
mod validation;

use app::YtdlApp;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    debug!(
        "Download service at {}, saving into {}",
        config.api_base_url,
        config.download_dir.display()
    );

    let app = YtdlApp::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([520.0, 560.0])
            .with_title("YouTube Downloader"),
        ..Default::default()
    };

    eframe::run_native(
        "YouTube Downloader",
        options,
        Box::new(|cc| {
            // Set light theme
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow!("failed to start the window: {e}"))
}
