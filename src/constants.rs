//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Grid geometry constants
pub mod grid {
    /// Column count of the canonical layout (the durable source of truth)
    pub const CANONICAL_COLUMNS: u32 = 12;

    /// Minimum card width (in cells) on the canonical 12-column grid
    pub const CANONICAL_MIN_W: u32 = 3;

    /// Minimum card height (in cells), shared by both grid representations
    pub const DEFAULT_MIN_H: u32 = 2;

    /// Fixed row height handed to the rendering surface, in pixels
    pub const ROW_HEIGHT_PX: f32 = 40.0;

    /// Gap between cards, in pixels
    pub const CARD_GAP_PX: f32 = 8.0;
}

/// Breakpoint constants: container width thresholds and the floor applied
/// before the breakpoint table is evaluated
pub mod breakpoints {
    /// Widths below this are treated as exactly this wide
    pub const MIN_WIDTH_PX: f32 = 600.0;

    /// `(upper exclusive bound in px, column count)` rows, evaluated in order;
    /// widths at or beyond the last bound resolve to `MAX_COLUMNS`
    pub const TABLE: [(f32, u32); 5] = [
        (600.0, 4),
        (900.0, 6),
        (1200.0, 8),
        (1600.0, 10),
        (1920.0, 11),
    ];

    /// Column count for widths at or beyond the widest threshold
    pub const MAX_COLUMNS: u32 = 12;
}

/// Resize debouncing
pub mod resize {
    /// Quiet period after the last container-size change before rescaling
    pub const DEBOUNCE_MS: u64 = 150;
}

/// Durable layout storage naming
pub mod storage {
    /// Directory under the platform data dir holding stored layouts
    pub const APP_DIR: &str = "branchboard";

    /// Stored layout file name prefix; the branch key is appended
    pub const LAYOUT_KEY_PREFIX: &str = "dashboard-layout-";

    /// Stored layout file extension
    pub const LAYOUT_EXT: &str = "json";
}
