//! The dashboard application: an eframe `App` that renders the displayed
//! layout as draggable/resizable cards and routes gestures and resizes into
//! the layout service.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::{egui, NativeOptions};
use tracing::info;

use super::constants::*;
use crate::constants::grid::{CARD_GAP_PX, ROW_HEIGHT_PX};
use crate::constants::resize::DEBOUNCE_MS;
use crate::controller::DashboardLayoutService;
use crate::layout::{CardId, CardLayoutEntry, Layout};
use crate::metrics::{self, DashboardData, FetchResult, Period};
use crate::resize::ResizeCoordinator;
use crate::store::LayoutStore;

enum FetchState {
    Loading,
    Ready(DashboardData),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Move,
    Resize,
}

/// In-progress gesture: accumulated pixel delta, committed to the layout
/// service when the drag stops.
struct DragState {
    card: CardId,
    mode: DragMode,
    delta: egui::Vec2,
}

pub struct DashboardApp {
    service: DashboardLayoutService,
    resize: ResizeCoordinator,
    period: Period,
    fetch: FetchState,
    fetch_rx: Option<Receiver<FetchResult>>,
    drag: Option<DragState>,
}

impl DashboardApp {
    fn new(branch: String, period: Period) -> Self {
        let mut app = Self {
            service: DashboardLayoutService::new(LayoutStore::new(), branch),
            resize: ResizeCoordinator::new(),
            period,
            fetch: FetchState::Loading,
            fetch_rx: None,
            drag: None,
        };
        app.start_fetch();
        app
    }

    fn start_fetch(&mut self) {
        let (tx, rx) = mpsc::channel();
        // Detached: the thread reports over the channel and exits.
        let _ = metrics::spawn_fetch(self.service.branch_key().to_string(), self.period, tx);
        self.fetch = FetchState::Loading;
        self.fetch_rx = Some(rx);
    }

    fn poll_fetch(&mut self) {
        if let Some(rx) = &self.fetch_rx {
            if let Ok(result) = rx.try_recv() {
                self.fetch = match result {
                    Ok(data) => FetchState::Ready(data),
                    Err(err) => FetchState::Failed(err.to_string()),
                };
                self.fetch_rx = None;
            }
        }
    }

    /// Drive the resize coordinator from the panel's content width.
    fn observe_width(&mut self, ctx: &egui::Context, width: f32) {
        let now = Instant::now();
        self.resize.observe(width, now);
        if let Some(change) = self.resize.poll(now) {
            self.service.rescale(change.columns);
        }
        if self.resize.is_pending() {
            // Keep painting while the quiet period runs so the timer can
            // fire without another input event.
            ctx.request_repaint_after(Duration::from_millis(DEBOUNCE_MS));
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Branch Dashboard");
            ui.separator();
            ui.label(format!("Branch: {}", self.service.branch_key()));
            ui.separator();

            let previous = self.period;
            egui::ComboBox::from_id_salt("period")
                .selected_text(self.period.label())
                .show_ui(ui, |ui| {
                    for period in [Period::Weekly, Period::Monthly, Period::Yearly] {
                        ui.selectable_value(&mut self.period, period, period.label());
                    }
                });
            if self.period != previous {
                self.start_fetch();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset layout").clicked() {
                    self.service.reset();
                }
            });
        });
    }

    fn error_panel(&mut self, ui: &mut egui::Ui, message: String) {
        ui.group(|ui| {
            ui.colored_label(ERROR_TEXT, "Failed to load dashboard data");
            ui.label(message);
            if ui.button("Retry").clicked() {
                self.start_fetch();
            }
        });
    }

    /// Render the grid surface and collect the edit a finished gesture
    /// produces, if any.
    fn grid_surface(&mut self, ui: &mut egui::Ui, width: f32) {
        let columns = self.service.columns();
        let cell_w = width / columns as f32;
        let origin = ui.available_rect_before_wrap().min;

        let displayed = self.service.displayed().clone();
        let mut committed_edit: Option<Layout> = None;

        for entry in &displayed {
            let mut rect = cell_rect(origin, entry, cell_w);
            let dragging_this = self
                .drag
                .as_ref()
                .filter(|d| d.card == entry.id)
                .map(|d| (d.mode, d.delta));
            match dragging_this {
                Some((DragMode::Move, delta)) => rect = rect.translate(delta),
                Some((DragMode::Resize, delta)) => {
                    rect.max += delta;
                    rect.max = rect.max.max(rect.min + egui::vec2(cell_w, ROW_HEIGHT_PX));
                }
                None => {}
            }

            let handle = egui::Rect::from_min_max(
                rect.max - egui::vec2(RESIZE_HANDLE_PX, RESIZE_HANDLE_PX),
                rect.max,
            );
            let body_id = ui.make_persistent_id(("card", entry.id));
            let handle_id = ui.make_persistent_id(("card-resize", entry.id));
            let body = ui.interact(rect, body_id, egui::Sense::drag());
            let grip = ui.interact(handle, handle_id, egui::Sense::drag());

            self.track_gesture(entry.id, DragMode::Resize, &grip);
            if !grip.dragged() && !grip.drag_stopped() {
                self.track_gesture(entry.id, DragMode::Move, &body);
            }

            if body.drag_stopped() || grip.drag_stopped() {
                if let Some(drag) = self.drag.take() {
                    committed_edit =
                        Some(commit_gesture(&displayed, &drag, columns, cell_w));
                }
            }

            let dragged = self.drag.as_ref().is_some_and(|d| d.card == entry.id);
            self.paint_card(ui, entry, rect, dragged);
        }

        if let Some(edited) = committed_edit {
            self.service.apply_user_edit(edited);
        }
    }

    fn track_gesture(&mut self, card: CardId, mode: DragMode, response: &egui::Response) {
        if response.drag_started() {
            info!(card = %card, mode = ?mode, "Gesture started");
            self.drag = Some(DragState {
                card,
                mode,
                delta: egui::Vec2::ZERO,
            });
        }
        if response.dragged() {
            if let Some(drag) = self.drag.as_mut().filter(|d| d.card == card && d.mode == mode) {
                drag.delta += response.drag_delta();
            }
        }
    }

    fn paint_card(&self, ui: &egui::Ui, entry: &CardLayoutEntry, rect: egui::Rect, dragged: bool) {
        let painter = ui.painter();
        let corner = egui::CornerRadius::same(6);
        painter.rect_filled(rect, corner, CARD_FILL);
        let stroke_color = if dragged { CARD_DRAGGED_STROKE } else { CARD_STROKE };
        painter.rect_stroke(
            rect,
            corner,
            egui::Stroke::new(1.0, stroke_color),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.min + egui::vec2(PADDING, PADDING),
            egui::Align2::LEFT_TOP,
            entry.id.title(),
            egui::FontId::proportional(14.0),
            CARD_TITLE,
        );

        // Resize grip in the bottom-right corner
        for i in 1..=3 {
            let offset = i as f32 * 4.0;
            painter.line_segment(
                [
                    rect.max - egui::vec2(offset, 2.0),
                    rect.max - egui::vec2(2.0, offset),
                ],
                egui::Stroke::new(1.0, CARD_STROKE),
            );
        }

        let body = rect.shrink(PADDING).translate(egui::vec2(0.0, 22.0));
        match &self.fetch {
            FetchState::Ready(data) => self.paint_card_body(painter, entry.id, body, data),
            FetchState::Loading => {
                painter.text(
                    body.min,
                    egui::Align2::LEFT_TOP,
                    "Loading…",
                    egui::FontId::proportional(12.0),
                    CARD_TITLE,
                );
            }
            FetchState::Failed(_) => {
                painter.text(
                    body.min,
                    egui::Align2::LEFT_TOP,
                    "—",
                    egui::FontId::proportional(12.0),
                    CARD_TITLE,
                );
            }
        }
    }

    fn paint_card_body(
        &self,
        painter: &egui::Painter,
        card: CardId,
        body: egui::Rect,
        data: &DashboardData,
    ) {
        if let Some(kpi) = data.kpi(card) {
            painter.text(
                body.min,
                egui::Align2::LEFT_TOP,
                format!("{:.0}", kpi.value),
                egui::FontId::proportional(26.0),
                CARD_VALUE,
            );
            let delta_color = if kpi.delta_pct >= 0.0 { DELTA_UP } else { DELTA_DOWN };
            painter.text(
                body.min + egui::vec2(0.0, 32.0),
                egui::Align2::LEFT_TOP,
                format!("{:+.1}% vs previous", kpi.delta_pct),
                egui::FontId::proportional(12.0),
                delta_color,
            );
            return;
        }

        let chart = egui::Rect::from_min_max(
            body.min + egui::vec2(0.0, 4.0),
            body.max - egui::vec2(0.0, 4.0),
        );
        if chart.height() < 10.0 || chart.width() < 10.0 {
            return;
        }
        match card {
            CardId::Revenue => paint_line_series(painter, chart, &data.revenue_series),
            CardId::Attendance => paint_bar_series(painter, chart, &data.attendance_series),
            CardId::Category => paint_breakdown(painter, chart, &data.category_breakdown),
            _ => {}
        }
    }
}

/// Pixel rect for an entry on the grid, inset by half the card gap.
fn cell_rect(origin: egui::Pos2, entry: &CardLayoutEntry, cell_w: f32) -> egui::Rect {
    let min = origin
        + egui::vec2(entry.x as f32 * cell_w, entry.y as f32 * ROW_HEIGHT_PX);
    let size = egui::vec2(entry.w as f32 * cell_w, entry.h as f32 * ROW_HEIGHT_PX);
    egui::Rect::from_min_size(min, size).shrink(CARD_GAP_PX / 2.0)
}

/// Convert a finished gesture's pixel delta into cell coordinates and build
/// the edited displayed layout. Values are clamped to the grid here only as
/// far as the rendering needs; the scaler re-clamps on the way to canonical.
fn commit_gesture(displayed: &Layout, drag: &DragState, columns: u32, cell_w: f32) -> Layout {
    let cells_x = (drag.delta.x / cell_w).round() as i64;
    let cells_y = (drag.delta.y / ROW_HEIGHT_PX).round() as i64;

    displayed
        .iter()
        .map(|entry| {
            let mut edited = entry.clone();
            if entry.id != drag.card {
                return edited;
            }
            match drag.mode {
                DragMode::Move => {
                    let max_x = (columns - entry.w) as i64;
                    edited.x = (entry.x as i64 + cells_x).clamp(0, max_x) as u32;
                    edited.y = (entry.y as i64 + cells_y).max(0) as u32;
                }
                DragMode::Resize => {
                    let max_w = (columns - entry.x) as i64;
                    edited.w = (entry.w as i64 + cells_x)
                        .clamp(entry.min_w as i64, max_w) as u32;
                    edited.h = (entry.h as i64 + cells_y).max(entry.min_h as i64) as u32;
                }
            }
            info!(
                card = %entry.id,
                x = edited.x, y = edited.y, w = edited.w, h = edited.h,
                "Committing layout edit"
            );
            edited
        })
        .collect()
}

fn paint_line_series(painter: &egui::Painter, rect: egui::Rect, series: &[f64]) {
    if series.len() < 2 {
        return;
    }
    let (low, high) = series_range(series);
    let step = rect.width() / (series.len() - 1) as f32;
    let points: Vec<egui::Pos2> = series
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let t = ((v - low) / (high - low)) as f32;
            egui::pos2(
                rect.min.x + i as f32 * step,
                rect.max.y - t * rect.height(),
            )
        })
        .collect();
    painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, CHART_ACCENT)));
}

fn paint_bar_series(painter: &egui::Painter, rect: egui::Rect, series: &[f64]) {
    if series.is_empty() {
        return;
    }
    let (_, high) = series_range(series);
    let slot = rect.width() / series.len() as f32;
    for (i, v) in series.iter().enumerate() {
        let t = (v / high) as f32;
        let bar = egui::Rect::from_min_max(
            egui::pos2(rect.min.x + i as f32 * slot + 1.0, rect.max.y - t * rect.height()),
            egui::pos2(rect.min.x + (i + 1) as f32 * slot - 1.0, rect.max.y),
        );
        painter.rect_filled(bar, egui::CornerRadius::ZERO, CHART_ACCENT);
    }
}

fn paint_breakdown(painter: &egui::Painter, rect: egui::Rect, breakdown: &[(&str, f64)]) {
    if breakdown.is_empty() {
        return;
    }
    let high = breakdown.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max).max(1.0);
    let row_h = rect.height() / breakdown.len() as f32;
    for (i, (label, value)) in breakdown.iter().enumerate() {
        let y = rect.min.y + i as f32 * row_h;
        let bar = egui::Rect::from_min_max(
            egui::pos2(rect.min.x + 80.0, y + 2.0),
            egui::pos2(
                rect.min.x + 80.0 + (rect.width() - 80.0) * (*value / high) as f32,
                y + row_h - 2.0,
            ),
        );
        painter.rect_filled(bar, egui::CornerRadius::ZERO, CHART_ACCENT);
        painter.text(
            egui::pos2(rect.min.x, y + row_h / 2.0),
            egui::Align2::LEFT_CENTER,
            *label,
            egui::FontId::proportional(12.0),
            CARD_TITLE,
        );
    }
}

fn series_range(series: &[f64]) -> (f64, f64) {
    let low = series.iter().copied().fold(f64::MAX, f64::min);
    let high = series.iter().copied().fold(f64::MIN, f64::max);
    if (high - low).abs() < f64::EPSILON {
        (low - 1.0, high + 1.0)
    } else {
        (low, high)
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_fetch();

        egui::TopBottomPanel::top("top-bar").show(ctx, |ui| {
            ui.add_space(PADDING / 2.0);
            self.top_bar(ui);
            ui.add_space(PADDING / 2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let width = ui.available_width();
            self.observe_width(ctx, width);

            if let FetchState::Failed(message) = &self.fetch {
                let message = message.clone();
                self.error_panel(ui, message);
                ui.add_space(SECTION_SPACING);
            }

            self.grid_surface(ui, width);
        });

        if self.drag.is_some() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.resize.cancel();
        info!("Dashboard exiting");
    }
}

pub fn run_gui(branch: String, period: Period) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Branchboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Branchboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(branch, period)))),
    )
    .map_err(|err| anyhow!("Failed to launch dashboard: {err}"))
}
