//! GUI-specific constants for window sizing, spacing and the card palette

use egui;

/// Dashboard window dimensions
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 900.0;
pub const WINDOW_MIN_WIDTH: f32 = 700.0;
pub const WINDOW_MIN_HEIGHT: f32 = 500.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 12.0;

/// Card chrome
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(32, 36, 44);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(60, 66, 78);
pub const CARD_DRAGGED_STROKE: egui::Color32 = egui::Color32::from_rgb(110, 160, 255);
pub const CARD_TITLE: egui::Color32 = egui::Color32::from_rgb(200, 205, 215);
pub const CARD_VALUE: egui::Color32 = egui::Color32::WHITE;

/// KPI delta colors
pub const DELTA_UP: egui::Color32 = egui::Color32::from_rgb(0, 200, 90);
pub const DELTA_DOWN: egui::Color32 = egui::Color32::from_rgb(220, 70, 70);

/// Chart accent
pub const CHART_ACCENT: egui::Color32 = egui::Color32::from_rgb(110, 160, 255);

/// Error panel
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 70, 70);

/// Size of the resize handle in the card's bottom-right corner, in pixels
pub const RESIZE_HANDLE_PX: f32 = 14.0;
