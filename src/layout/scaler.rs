//! Bidirectional layout scaling between the canonical 12-column grid and the
//! currently displayed column count.
//!
//! Both directions are pure: round the scaled width and position, clamp the
//! width into its floor/ceiling, then clamp the position against the
//! remaining span. The shared clamp lives in [`entry::clamp_entry`] so the
//! two directions cannot drift apart.

use crate::constants::grid::{CANONICAL_COLUMNS, CANONICAL_MIN_W, DEFAULT_MIN_H};
use crate::layout::entry::{clamp_entry, CardLayoutEntry, Layout};

/// Width floor for a displayed grid: shrinks with fewer columns but stays
/// within `[2, 3]`. The thresholds are a policy table tuned against the
/// breakpoint set; keep them literal.
fn displayed_min_w(columns: u32) -> u32 {
    (columns / 4).clamp(2, 3)
}

fn min_h_of(entry: &CardLayoutEntry) -> u32 {
    if entry.min_h == 0 {
        DEFAULT_MIN_H
    } else {
        entry.min_h
    }
}

fn scale_entry(entry: &CardLayoutEntry, scale: f64, columns: u32, min_w: u32) -> CardLayoutEntry {
    let mut scaled = CardLayoutEntry {
        id: entry.id,
        x: (entry.x as f64 * scale).round() as u32,
        y: entry.y,
        w: (entry.w as f64 * scale).round() as u32,
        h: entry.h,
        min_w: entry.min_w,
        min_h: entry.min_h,
    };
    clamp_entry(&mut scaled, columns, min_w, min_h_of(entry));
    scaled
}

/// Derive the displayed layout for `columns` from the canonical layout.
///
/// Heights are carried through unscaled (rows are a fixed pixel size); only
/// the horizontal axis is rescaled. Callers must short-circuit when the
/// column count is unchanged so repeated rounding cannot drift the layout.
pub fn to_displayed(canonical: &Layout, columns: u32) -> Layout {
    let scale = columns as f64 / CANONICAL_COLUMNS as f64;
    let min_w = displayed_min_w(columns);
    canonical
        .iter()
        .map(|entry| scale_entry(entry, scale, columns, min_w))
        .collect()
}

/// Project a displayed layout edited at `columns` back onto the canonical
/// 12-column grid.
pub fn to_canonical(displayed: &Layout, columns: u32) -> Layout {
    let scale = CANONICAL_COLUMNS as f64 / columns as f64;
    displayed
        .iter()
        .map(|entry| scale_entry(entry, scale, CANONICAL_COLUMNS, CANONICAL_MIN_W))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::entry::{default_layout, CardId};

    const ALL_COLUMN_COUNTS: [u32; 6] = [4, 6, 8, 10, 11, 12];

    #[test]
    fn test_identity_at_twelve_columns() {
        let layout = default_layout();
        assert_eq!(to_displayed(&layout, 12), layout);
    }

    #[test]
    fn test_bounds_invariant_after_scaling() {
        let layout = default_layout();
        for columns in ALL_COLUMN_COUNTS {
            for entry in to_displayed(&layout, columns) {
                assert!(
                    entry.x + entry.w <= columns,
                    "{} off-grid at {columns} columns: x={} w={}",
                    entry.id,
                    entry.x,
                    entry.w
                );
                assert!(entry.w >= entry.min_w, "{} below min width", entry.id);
                assert!(entry.h >= entry.min_h, "{} below min height", entry.id);
            }
        }
    }

    #[test]
    fn test_displayed_min_width_policy() {
        assert_eq!(displayed_min_w(4), 2);
        assert_eq!(displayed_min_w(6), 2);
        assert_eq!(displayed_min_w(8), 2);
        assert_eq!(displayed_min_w(10), 2);
        assert_eq!(displayed_min_w(11), 2);
        assert_eq!(displayed_min_w(12), 3);
    }

    #[test]
    fn test_sales_card_scaled_to_six_columns() {
        // 12 -> 6 columns: w = round(3 * 0.5) = 2 (already at the width
        // floor for 6 columns), x stays 0.
        let displayed = to_displayed(&default_layout(), 6);
        let sales = displayed.iter().find(|e| e.id == CardId::Sales).unwrap();
        assert_eq!(sales.x, 0);
        assert_eq!(sales.w, 2);
        assert_eq!(sales.min_w, 2);
        assert_eq!(sales.h, 4);
    }

    #[test]
    fn test_oversized_entry_shrinks_to_full_row() {
        let layout = vec![crate::layout::CardLayoutEntry::new(
            CardId::Attendance,
            0,
            0,
            12,
            6,
        )];
        let displayed = to_displayed(&layout, 4);
        assert_eq!(displayed[0].x, 0);
        assert_eq!(displayed[0].w, 4);
    }

    #[test]
    fn test_round_trip_within_one_cell() {
        let layout = default_layout();
        let round_tripped = to_canonical(&to_displayed(&layout, 6), 6);
        for (before, after) in layout.iter().zip(&round_tripped) {
            assert_eq!(before.id, after.id);
            assert!(
                before.x.abs_diff(after.x) <= 1,
                "{} x drifted {} -> {}",
                before.id,
                before.x,
                after.x
            );
            assert!(
                before.w.abs_diff(after.w) <= 1,
                "{} w drifted {} -> {}",
                before.id,
                before.w,
                after.w
            );
            assert!(after.x + after.w <= 12);
        }
    }

    #[test]
    fn test_to_canonical_enforces_canonical_floor() {
        // A 2-wide card on a 6-column grid maps to 4 canonical cells, but a
        // 1-wide stray (below the displayed floor, e.g. from hand-edited
        // storage) must come back at least 3 wide.
        let displayed = vec![crate::layout::CardLayoutEntry::new(CardId::Sales, 5, 0, 1, 4)];
        let canonical = to_canonical(&displayed, 6);
        assert_eq!(canonical[0].w, 3);
        assert!(canonical[0].x + canonical[0].w <= 12);
        assert_eq!(canonical[0].min_w, 3);
    }
}
