//! egui dashboard surface: card rendering, drag/resize gestures, and the
//! frame loop that feeds the resize coordinator.

pub mod app;
pub mod constants;

pub use app::run_gui;
