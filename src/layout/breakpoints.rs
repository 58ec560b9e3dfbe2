//! Container width → grid column count resolution.

use crate::constants::breakpoints::{MAX_COLUMNS, TABLE};

/// Map a container content width (px) to a discrete column count.
///
/// Pure and total: any finite width resolves to one of {4, 6, 8, 10, 11, 12}.
/// First matching table row wins; widths at or beyond the widest threshold
/// get the full 12 columns.
pub fn resolve_columns(width_px: f32) -> u32 {
    for (bound, columns) in TABLE {
        if width_px < bound {
            return columns;
        }
    }
    MAX_COLUMNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_exactness() {
        assert_eq!(resolve_columns(599.0), 4);
        assert_eq!(resolve_columns(600.0), 6);
        assert_eq!(resolve_columns(899.0), 6);
        assert_eq!(resolve_columns(900.0), 8);
        assert_eq!(resolve_columns(1199.0), 8);
        assert_eq!(resolve_columns(1200.0), 10);
        assert_eq!(resolve_columns(1599.0), 10);
        assert_eq!(resolve_columns(1600.0), 11);
        assert_eq!(resolve_columns(1919.0), 11);
        assert_eq!(resolve_columns(1920.0), 12);
    }

    #[test]
    fn test_extreme_widths() {
        assert_eq!(resolve_columns(0.0), 4);
        assert_eq!(resolve_columns(10_000.0), 12);
    }

    #[test]
    fn test_monotonic_over_sampled_widths() {
        let mut previous = 0;
        for width in (0..2400).step_by(10) {
            let columns = resolve_columns(width as f32);
            assert!(
                columns >= previous,
                "columns decreased at width {width}: {previous} -> {columns}"
            );
            previous = columns;
        }
    }
}
