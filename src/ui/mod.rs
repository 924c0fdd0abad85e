use eframe::egui;
use rfd::FileDialog;
use std::path::Path;

use crate::form::DownloadForm;
use crate::models::{BackendStatus, DownloadFormat, MessageKind, QualityCatalog};
use crate::theme::*;

pub fn render_url_input(ui: &mut egui::Ui, form: &mut DownloadForm) -> egui::Response {
    let localizer = form.localizer();
    ui.label(localizer.tr("url-label"));
    let hint = localizer.tr("url-placeholder");

    // Edit a copy so the message-clearing side effect goes through the form.
    let mut url = form.state.url.clone();
    let response = egui::Frame::group(ui.style())
        .fill(INPUT_BG)
        .stroke(egui::Stroke::new(1.0, BORDER_COLOR))
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.add_sized(
                [ui.available_width(), 40.0],
                egui::TextEdit::singleline(&mut url)
                    .hint_text(hint)
                    .font(egui::FontId::proportional(16.0)),
            )
        })
        .inner;

    if response.changed() {
        form.set_url(url);
    }
    response
}

pub fn render_format_selector(ui: &mut egui::Ui, form: &mut DownloadForm) {
    let localizer = form.localizer();
    ui.label(localizer.tr("format-label"));
    let mp4_label = localizer.tr("format-mp4");
    let mp3_label = localizer.tr("format-mp3");

    let mut format = form.state.format;
    ui.horizontal(|ui| {
        ui.radio_value(&mut format, DownloadFormat::Mp4, mp4_label);
        ui.radio_value(&mut format, DownloadFormat::Mp3, mp3_label);
    });

    if format != form.state.format {
        form.set_format(format);
    }
}

pub fn render_quality_selector(ui: &mut egui::Ui, form: &mut DownloadForm) {
    let format = form.state.format;
    let label_key = match format {
        DownloadFormat::Mp3 => "quality-audio",
        DownloadFormat::Mp4 => "quality-video",
    };
    ui.label(form.localizer().tr(label_key));

    let current = form.state.quality.clone();
    let mut selected = current.clone();
    egui::ComboBox::from_id_source("quality")
        .width(ui.available_width())
        .selected_text(QualityCatalog::label(format, &current).unwrap_or(current.as_str()))
        .show_ui(ui, |ui| {
            for (key, label) in QualityCatalog::options(format) {
                ui.selectable_value(&mut selected, key.to_string(), *label);
            }
        });

    if selected != current {
        form.set_quality(&selected);
    }
}

pub fn render_download_dir_selector(ui: &mut egui::Ui, form: &mut DownloadForm) -> bool {
    let mut changed = false;
    let label = form.localizer().tr("download-to");
    let hint = form.localizer().tr("download-dir-placeholder");
    let browse = form.localizer().tr("browse-button");

    ui.vertical(|ui| {
        ui.label(label);

        ui.horizontal(|ui| {
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(ROUNDING_FRAME)
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .show(ui, |ui| {
                    ui.set_min_height(36.0);
                    let response = ui.add_sized(
                        [ui.available_width() - 100.0, 36.0],
                        egui::TextEdit::singleline(&mut form.download_dir)
                            .hint_text(hint)
                            .frame(false)
                            .margin(egui::vec2(8.0, 8.0)),
                    );
                    changed = response.changed();
                });

            let button = egui::Button::new(egui::RichText::new(browse).size(14.0))
                .min_size(egui::vec2(100.0, 36.0))
                .frame(true)
                .fill(ui.visuals().widgets.inactive.bg_fill)
                .rounding(ROUNDING_FRAME);

            if ui.add(button).clicked() {
                if let Some(path) = FileDialog::new()
                    .set_directory(Path::new(&form.download_dir))
                    .pick_folder()
                {
                    form.download_dir = path.to_string_lossy().to_string();
                    changed = true;
                }
            }
        });
    });

    changed
}

/// Returns true when the submit button was clicked.
pub fn render_submit_button(ui: &mut egui::Ui, form: &DownloadForm) -> bool {
    let fill = if form.can_submit() {
        PRIMARY_BUTTON_BG
    } else {
        DISABLED_BUTTON_BG
    };

    let button = egui::Button::new(
        egui::RichText::new(form.submit_label())
            .size(BUTTON_FONT_SIZE)
            .color(BUTTON_MAIN_TEXT),
    )
    .min_size(MIN_SIZE_BUTTON)
    .fill(fill)
    .rounding(ROUNDING_BUTTON);

    ui.horizontal(|ui| {
        ui.add_space((ui.available_width() - MIN_SIZE_BUTTON.x).max(0.0) / 2.0);
        if form.is_loading() {
            ui.spinner();
        }
        ui.add_enabled(form.can_submit(), button).clicked()
    })
    .inner
}

pub fn render_message(ui: &mut egui::Ui, form: &DownloadForm) {
    let (bg, color) = match form.state.message_kind {
        MessageKind::None => return,
        MessageKind::Error => (ERROR_BG, TEXT_ERROR),
        MessageKind::Success => (SUCCESS_BG, TEXT_SUCCESS),
    };

    egui::Frame::group(ui.style())
        .fill(bg)
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(ROUNDING_BUTTON)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&form.state.message).color(color));

            if form.state.message_kind == MessageKind::Success {
                if let Some(path) = &form.last_saved {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} {}",
                            form.localizer().tr("saved-to"),
                            path.display()
                        ))
                        .color(SECONDARY_TEXT),
                    );
                }
            }
        });
}

pub fn render_backend_status(ui: &mut egui::Ui, form: &DownloadForm, status: BackendStatus) {
    let (key, color) = match status {
        BackendStatus::Unknown => ("backend-unknown", SECONDARY_TEXT),
        BackendStatus::Reachable => ("backend-reachable", TEXT_SUCCESS),
        BackendStatus::Unreachable => ("backend-unreachable", TEXT_ERROR),
    };
    ui.label(
        egui::RichText::new(form.localizer().tr(key))
            .small()
            .color(color),
    );
}

pub fn render_instructions(ui: &mut egui::Ui, form: &DownloadForm) {
    let localizer = form.localizer();
    egui::CollapsingHeader::new(localizer.tr("instructions-title"))
        .default_open(false)
        .show(ui, |ui| {
            for (n, key) in ["instructions-1", "instructions-2", "instructions-3", "instructions-4"]
                .iter()
                .enumerate()
            {
                ui.label(format!("{}. {}", n + 1, localizer.tr(key)));
            }
        });

    ui.add_space(10.0);
    ui.label(
        egui::RichText::new(localizer.tr("footer-note"))
            .small()
            .color(SECONDARY_TEXT),
    );
}
