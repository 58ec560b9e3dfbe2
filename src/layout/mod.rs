//! Grid layout model and the scaling engine built on top of it
//!
//! The canonical layout always lives on a 12-column grid and is the durable
//! source of truth. The displayed layout is derived from it for whatever
//! column count the current container width resolves to, and is never
//! persisted directly.

pub mod breakpoints;
pub mod entry;
pub mod scaler;

pub use breakpoints::resolve_columns;
pub use entry::{default_layout, CardId, CardLayoutEntry, Layout};
pub use scaler::{to_canonical, to_displayed};
