use eframe::egui::{self, Color32};

// Accent
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(239, 68, 68); // Red accent for the download action
pub const DISABLED_BUTTON_BG: Color32 = Color32::from_rgb(203, 213, 225);

// Text Colors
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255);
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(100, 116, 139);

// Messages
pub const ERROR_BG: Color32 = Color32::from_rgb(254, 242, 242);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(185, 28, 28);
pub const SUCCESS_BG: Color32 = Color32::from_rgb(240, 253, 244);
pub const TEXT_SUCCESS: Color32 = Color32::from_rgb(21, 128, 61);

// Input color
pub const INPUT_BG: Color32 = Color32::from_rgb(250, 250, 250);

// UI Elements
pub const BORDER_COLOR: Color32 = Color32::from_rgb(226, 232, 240);

// Sizing & Spacing
pub const ROUNDING_FRAME: f32 = 4.0;
pub const ROUNDING_BUTTON: f32 = 8.0;
pub const MIN_SIZE_BUTTON: egui::Vec2 = egui::Vec2::new(300.0, 48.0);

pub const BUTTON_FONT_SIZE: f32 = 16.0;
