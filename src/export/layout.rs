use std::ops::Range;

use super::LegendPosition;
use crate::constants::{CHAR_WIDTH_RATIO, LEGEND_MARGIN_PX, LEGEND_SWATCH_PX, RANGE_PADDING};
use crate::data::model::Bounds;

/// Axis range with padding. A zero-width range is widened by ±0.5.
pub fn padded_range(min: f64, max: f64) -> Range<f64> {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5)..(max + 0.5);
    }
    let padding = span * RANGE_PADDING;
    (min - padding)..(max + padding)
}

/// X and y ranges for the given extent, or unit ranges when there is none.
pub fn axis_ranges(bounds: Option<Bounds>) -> (Range<f64>, Range<f64>) {
    match bounds {
        Some(b) => (padded_range(b.x_min, b.x_max), padded_range(b.y_min, b.y_max)),
        None => (0.0..1.0, 0.0..1.0),
    }
}

/// Estimated legend box size in pixels for the given entry labels.
pub fn legend_box_size(labels: &[&str], font_size: u32) -> (i32, i32) {
    let font = font_size as f64;
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let text_width = (longest as f64 * font * CHAR_WIDTH_RATIO).ceil() as i32;
    let row_height = (font * 1.25).ceil() as i32;
    let width = 2 * LEGEND_MARGIN_PX + LEGEND_SWATCH_PX + LEGEND_MARGIN_PX / 2 + text_width;
    let height = 2 * LEGEND_MARGIN_PX + row_height * labels.len() as i32;
    (width, height)
}

/// Top-left pixel of a legend box of `box_size` anchored at `position`
/// inside an area of `area` pixels.
pub fn legend_origin(position: LegendPosition, area: (u32, u32), box_size: (i32, i32)) -> (i32, i32) {
    let (ax, ay) = position.anchor_px(area.0 as f64, area.1 as f64);
    (ax.round() as i32 - box_size.0, ay.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_padded() {
        let r = padded_range(0.0, 10.0);
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn range_accepts_reversed_bounds() {
        assert_eq!(padded_range(10.0, 0.0), padded_range(0.0, 10.0));
    }

    #[test]
    fn flat_range_is_widened() {
        assert_eq!(padded_range(3.0, 3.0), 2.5..3.5);
    }

    #[test]
    fn no_bounds_gives_unit_ranges() {
        assert_eq!(axis_ranges(None), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn legend_box_grows_with_labels() {
        let small = legend_box_size(&["a"], 16);
        let wide = legend_box_size(&["a much longer label"], 16);
        let tall = legend_box_size(&["a", "b", "c"], 16);
        assert!(wide.0 > small.0);
        assert!(tall.1 > small.1);
        assert_eq!(wide.1, small.1);
    }

    #[test]
    fn default_legend_hugs_top_right() {
        let origin = legend_origin(LegendPosition::default(), (1000, 600), (120, 60));
        assert_eq!(origin, (880, 0));
    }

    #[test]
    fn legend_origin_can_leave_the_area() {
        let origin = legend_origin(LegendPosition::new(1.3, -0.1), (1000, 600), (100, 40));
        assert_eq!(origin, (1200, 660));
    }
}
