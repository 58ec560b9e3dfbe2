//! Dashboard layout service: owns the canonical and displayed layouts and
//! wires the store and scaler together.
//!
//! The canonical 12-column layout is the only source of truth; the displayed
//! layout is recomputed from it on every column-count change and every edit.
//! Rescales always read the canonical layout owned here at call time, never a
//! snapshot captured earlier, so a settled resize cannot apply a stale
//! layout.

use tracing::info;

use crate::constants::grid::CANONICAL_COLUMNS;
use crate::layout::{to_canonical, to_displayed, Layout};
use crate::store::LayoutStore;

pub struct DashboardLayoutService {
    store: LayoutStore,
    branch_key: String,
    canonical: Layout,
    displayed: Layout,
    columns: u32,
}

impl DashboardLayoutService {
    /// Load the branch's canonical layout and derive an initial 12-column
    /// display from it.
    pub fn new(store: LayoutStore, branch_key: impl Into<String>) -> Self {
        let branch_key = branch_key.into();
        let canonical = store.load(&branch_key);
        let displayed = to_displayed(&canonical, CANONICAL_COLUMNS);
        Self {
            store,
            branch_key,
            canonical,
            displayed,
            columns: CANONICAL_COLUMNS,
        }
    }

    pub fn branch_key(&self) -> &str {
        &self.branch_key
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// The layout currently handed to the rendering surface.
    pub fn displayed(&self) -> &Layout {
        &self.displayed
    }

    /// Rescale the display to a new column count. A no-op when the count is
    /// unchanged: re-deriving at the same count would accumulate rounding
    /// drift.
    pub fn rescale(&mut self, columns: u32) {
        if columns == self.columns {
            return;
        }
        info!(branch = %self.branch_key, from = self.columns, to = columns, "Rescaling layout");
        self.columns = columns;
        self.displayed = to_displayed(&self.canonical, columns);
    }

    /// Apply a completed drag/resize from the rendering surface: project the
    /// edited displayed layout back onto the canonical grid, persist it, and
    /// re-derive the display from the new canonical truth.
    pub fn apply_user_edit(&mut self, edited: Layout) {
        info!(branch = %self.branch_key, columns = self.columns, "Applying user layout edit");
        self.canonical = to_canonical(&edited, self.columns);
        self.store.save(&self.branch_key, &self.canonical);
        self.displayed = to_displayed(&self.canonical, self.columns);
    }

    /// Restore the default layout and clear the stored one.
    pub fn reset(&mut self) {
        info!(branch = %self.branch_key, "Resetting layout to default");
        self.canonical = self.store.reset(&self.branch_key);
        self.displayed = to_displayed(&self.canonical, self.columns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_layout, CardId};
    use std::fs;

    fn service(tag: &str) -> DashboardLayoutService {
        let dir = std::env::temp_dir().join(format!(
            "branchboard-controller-test-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        DashboardLayoutService::new(LayoutStore::with_base_dir(dir), "branch-1")
    }

    #[test]
    fn test_initial_display_is_default_at_twelve_columns() {
        let service = service("initial");
        assert_eq!(service.columns(), 12);
        assert_eq!(service.displayed(), &default_layout());
    }

    #[test]
    fn test_rescale_same_column_count_is_identity() {
        let mut service = service("identity");
        let before = service.displayed().clone();
        service.rescale(12);
        assert_eq!(service.displayed(), &before);
    }

    #[test]
    fn test_rescale_derives_from_canonical() {
        let mut service = service("rescale");
        service.rescale(6);
        assert_eq!(service.columns(), 6);
        for entry in service.displayed() {
            assert!(entry.x + entry.w <= 6);
        }
        // Back to 12 reproduces the canonical placements exactly; the
        // canonical layout was never touched by the narrow display.
        service.rescale(12);
        assert_eq!(service.displayed(), &default_layout());
    }

    #[test]
    fn test_user_edit_persists_canonical_positions() {
        let mut service = service("edit");
        let mut edited = service.displayed().clone();
        let order = edited.iter_mut().find(|e| e.id == CardId::Order).unwrap();
        order.x = 9;
        order.w = 3;
        service.apply_user_edit(edited);

        // A fresh service over the same store sees the persisted edit.
        let dir = std::env::temp_dir().join(format!(
            "branchboard-controller-test-edit-{}",
            std::process::id()
        ));
        let reloaded = DashboardLayoutService::new(LayoutStore::with_base_dir(dir), "branch-1");
        let order = reloaded
            .displayed()
            .iter()
            .find(|e| e.id == CardId::Order)
            .unwrap();
        assert_eq!(order.x, 9);
        assert_eq!(order.w, 3);
    }

    #[test]
    fn test_edit_at_narrow_width_survives_round_trip_within_tolerance() {
        let mut service = service("narrow-edit");
        service.rescale(6);
        let mut edited = service.displayed().clone();
        let sales = edited.iter_mut().find(|e| e.id == CardId::Sales).unwrap();
        sales.x = 4;
        sales.w = 2;
        service.apply_user_edit(edited);

        service.rescale(12);
        let sales = service
            .displayed()
            .iter()
            .find(|e| e.id == CardId::Sales)
            .unwrap();
        assert_eq!(sales.x, 8);
        assert_eq!(sales.w, 4);
    }

    #[test]
    fn test_reset_restores_default_display() {
        let mut service = service("reset");
        let mut edited = service.displayed().clone();
        edited[0].x = 6;
        service.apply_user_edit(edited);
        assert_ne!(service.displayed(), &default_layout());

        service.reset();
        assert_eq!(service.displayed(), &default_layout());
    }
}
