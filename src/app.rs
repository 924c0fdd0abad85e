use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use eframe::egui;
use log::debug;

use crate::config::AppConfig;
use crate::download::{check_health, HttpBackend};
use crate::form::DownloadForm;
use crate::localizations::Localizations;
use crate::models::BackendStatus;
use crate::ui;

pub struct YtdlApp {
    form: DownloadForm,
    backend_status: BackendStatus,
    health_receiver: Option<Receiver<BackendStatus>>,
}

impl YtdlApp {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = Arc::new(HttpBackend::new(config)?);
        let localizer = Localizations::new();
        debug!("UI language: {}", localizer.current_language());
        let form = DownloadForm::new(backend, localizer, config.download_dir.clone());

        let (tx, rx) = mpsc::channel();
        check_health(config, tx);

        Ok(Self {
            form,
            backend_status: BackendStatus::Unknown,
            health_receiver: Some(rx),
        })
    }

    fn process_status_updates(&mut self, ctx: &egui::Context) {
        let health = self.health_receiver.as_ref().map(|rx| rx.try_recv());
        match health {
            Some(Ok(status)) => {
                self.backend_status = status;
                self.health_receiver = None;
            }
            Some(Err(TryRecvError::Disconnected)) => {
                self.backend_status = BackendStatus::Unreachable;
                self.health_receiver = None;
            }
            Some(Err(TryRecvError::Empty)) | None => {}
        }

        if self.form.poll() {
            ctx.request_repaint();
        }

        // Nothing wakes egui when a worker reports, so keep polling.
        if self.form.is_loading() || self.health_receiver.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.process_status_updates(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(self.form.localizer().tr("app-title"));
                    ui.label(self.form.localizer().tr("app-subtitle"));
                });

                ui.add_space(20.0);

                let loading = self.form.is_loading();
                let mut enter_pressed = false;
                ui.add_enabled_ui(!loading, |ui| {
                    let url_response = ui::render_url_input(ui, &mut self.form);
                    enter_pressed = url_response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    ui.add_space(10.0);
                    ui::render_format_selector(ui, &mut self.form);
                    ui.add_space(10.0);
                    ui::render_quality_selector(ui, &mut self.form);
                    ui.add_space(10.0);
                    if ui::render_download_dir_selector(ui, &mut self.form) {
                        debug!("Download directory set to {}", self.form.download_dir);
                    }
                });

                ui.add_space(20.0);

                if ui::render_submit_button(ui, &self.form) || enter_pressed {
                    self.form.submit();
                    ctx.request_repaint();
                }

                ui.add_space(10.0);
                ui::render_message(ui, &self.form);
                ui.add_space(10.0);
                ui::render_backend_status(ui, &self.form, self.backend_status);

                ui.add_space(20.0);
                ui::render_instructions(ui, &self.form);
            });
        });
    }
}

impl eframe::App for YtdlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}
