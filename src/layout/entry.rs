//! Card placement model: the closed card-id set, one card's grid placement,
//! and the hard-coded default 12-column layout.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::grid::{CANONICAL_MIN_W, DEFAULT_MIN_H};

/// The fixed set of dashboard cards. Every layout carries exactly one entry
/// per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardId {
    Sales,
    Inventory,
    Employee,
    Order,
    Revenue,
    Category,
    Attendance,
}

impl CardId {
    /// All known cards, in default display order.
    pub const ALL: [CardId; 7] = [
        CardId::Sales,
        CardId::Inventory,
        CardId::Employee,
        CardId::Order,
        CardId::Revenue,
        CardId::Category,
        CardId::Attendance,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CardId::Sales => "Sales",
            CardId::Inventory => "Inventory",
            CardId::Employee => "Employees",
            CardId::Order => "Orders",
            CardId::Revenue => "Revenue",
            CardId::Category => "Sales by Category",
            CardId::Attendance => "Attendance",
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardId::Sales => "sales",
            CardId::Inventory => "inventory",
            CardId::Employee => "employee",
            CardId::Order => "order",
            CardId::Revenue => "revenue",
            CardId::Category => "category",
            CardId::Attendance => "attendance",
        };
        f.write_str(s)
    }
}

/// One card's placement on a grid.
///
/// `x,y` are cell coordinates (origin top-left), `w,h` cell spans. `min_w`
/// and `min_h` are carried in the entry so the rendering surface enforces
/// the same floor during interactive resize that the scaler enforced when
/// deriving the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLayoutEntry {
    pub id: CardId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(rename = "minW", default = "default_min_w")]
    pub min_w: u32,
    #[serde(rename = "minH", default = "default_min_h")]
    pub min_h: u32,
}

fn default_min_w() -> u32 {
    CANONICAL_MIN_W
}

fn default_min_h() -> u32 {
    DEFAULT_MIN_H
}

/// An ordered set of card placements, one per known card id.
pub type Layout = Vec<CardLayoutEntry>;

impl CardLayoutEntry {
    pub fn new(id: CardId, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id,
            x,
            y,
            w,
            h,
            min_w: default_min_w(),
            min_h: default_min_h(),
        }
    }
}

/// Shared clamp primitive used by both scaling directions.
///
/// Order matters: width is clamped into `[min_w, columns]` first, and only
/// then is `x` clamped against `columns - w`. Clamping in the other order can
/// push an entry off-grid.
pub fn clamp_entry(entry: &mut CardLayoutEntry, columns: u32, min_w: u32, min_h: u32) {
    entry.w = entry.w.clamp(min_w, columns);
    entry.x = entry.x.min(columns - entry.w);
    entry.h = entry.h.max(min_h);
    entry.min_w = min_w;
    entry.min_h = min_h;
}

/// The hard-coded default canonical layout: a KPI row of four quarter-width
/// cards, two half-width charts, and a full-width attendance chart.
pub fn default_layout() -> Layout {
    vec![
        CardLayoutEntry::new(CardId::Sales, 0, 0, 3, 4),
        CardLayoutEntry::new(CardId::Inventory, 3, 0, 3, 4),
        CardLayoutEntry::new(CardId::Employee, 6, 0, 3, 4),
        CardLayoutEntry::new(CardId::Order, 9, 0, 3, 4),
        CardLayoutEntry::new(CardId::Revenue, 0, 4, 6, 6),
        CardLayoutEntry::new(CardId::Category, 6, 4, 6, 6),
        CardLayoutEntry::new(CardId::Attendance, 0, 10, 12, 6),
    ]
}

/// Check that a layout covers every known card id exactly once.
///
/// Used when loading persisted layouts: anything else (missing card, duplicate,
/// unknown id rejected earlier by deserialization) falls back to the default.
pub fn is_complete(layout: &Layout) -> bool {
    layout.len() == CardId::ALL.len()
        && CardId::ALL
            .iter()
            .all(|id| layout.iter().filter(|e| e.id == *id).count() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_complete() {
        assert!(is_complete(&default_layout()));
    }

    #[test]
    fn test_default_layout_within_canonical_bounds() {
        for entry in default_layout() {
            assert!(entry.x + entry.w <= 12, "entry {} off-grid", entry.id);
            assert!(entry.w >= entry.min_w);
            assert!(entry.h >= entry.min_h);
        }
    }

    #[test]
    fn test_is_complete_rejects_missing_card() {
        let mut layout = default_layout();
        layout.pop();
        assert!(!is_complete(&layout));
    }

    #[test]
    fn test_is_complete_rejects_duplicate_card() {
        let mut layout = default_layout();
        layout.pop();
        layout.push(CardLayoutEntry::new(CardId::Sales, 0, 16, 3, 4));
        assert!(!is_complete(&layout));
    }

    #[test]
    fn test_clamp_entry_width_before_position() {
        // An oversized entry near the right edge must shrink to the full
        // column span and land at x=0, not get pushed off-grid.
        let mut entry = CardLayoutEntry::new(CardId::Sales, 5, 0, 8, 4);
        clamp_entry(&mut entry, 6, 2, 2);
        assert_eq!(entry.w, 6);
        assert_eq!(entry.x, 0);
    }

    #[test]
    fn test_clamp_entry_enforces_min_height() {
        let mut entry = CardLayoutEntry::new(CardId::Revenue, 0, 0, 6, 1);
        clamp_entry(&mut entry, 12, 3, 2);
        assert_eq!(entry.h, 2);
    }

    #[test]
    fn test_entry_json_defaults_for_missing_minimums() {
        // Stored layouts written before min_w/min_h were persisted still load.
        let entry: CardLayoutEntry =
            serde_json::from_str(r#"{"id":"sales","x":0,"y":0,"w":3,"h":4}"#).unwrap();
        assert_eq!(entry.min_w, 3);
        assert_eq!(entry.min_h, 2);
    }
}
