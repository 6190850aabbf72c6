//! Themes, the default series palette and the alpha policy.

use crate::render::{Color, LineStyle};
use crate::series::CurveStyle;

/// Colors assigned to series in creation order; wraps after the last entry.
pub const SERIES_PALETTE: [Color; 12] = [
    Color::from_rgb8(0, 0, 255),
    Color::from_rgb8(255, 0, 0),
    Color::from_rgb8(0, 255, 0),
    Color::from_rgb8(0, 0, 0),
    Color::from_rgb8(0, 255, 255),
    Color::from_rgb8(255, 0, 255),
    Color::from_rgb8(255, 255, 0),
    Color::from_rgb8(160, 160, 164),
    Color::from_rgb8(128, 0, 0),
    Color::from_rgb8(0, 128, 0),
    Color::from_rgb8(0, 0, 128),
    Color::from_rgb8(128, 128, 128),
];

const FILL_ALPHA_BUDGET: u32 = 127;
const OUTLINE_ALPHA_BUDGET: u32 = 255;

/// Fill alpha when `series` curves share the plot.
pub fn shared_fill_alpha(series: usize) -> u8 {
    (FILL_ALPHA_BUDGET / series.max(1) as u32) as u8
}

/// Outline and marker alpha when `series` curves share the plot.
pub fn shared_outline_alpha(series: usize) -> u8 {
    (OUTLINE_ALPHA_BUDGET / series.max(1) as u32) as u8
}

/// Outline alpha paired with an explicit fill alpha: 1.5x, capped at 255.
pub fn outline_alpha_for_fill(alpha: u8) -> u8 {
    ((alpha as f64 * 1.5) as u32).min(255) as u8
}

/// Initial style of series `index` out of `series`.
pub(crate) fn default_curve_style(index: usize, series: usize) -> CurveStyle {
    let color = SERIES_PALETTE[index % SERIES_PALETTE.len()];
    CurveStyle {
        pen: LineStyle { color, width: 1.0 },
        brush: color.with_alpha8(shared_fill_alpha(series)),
        marker: None,
    }
}

/// Visual theme for plots.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Widget background.
    pub background: Color,
    /// Axis lines, ticks and labels.
    pub axis: Color,
    /// Major grid lines.
    pub grid_major: Color,
    /// Minor grid lines.
    pub grid_minor: Color,
    /// Rubber band fill.
    pub selection_fill: Color,
    /// Rubber band border and tracker text.
    pub selection_border: Color,
    /// Tracker label background.
    pub tracker_bg: Color,
    /// Legend background.
    pub legend_bg: Color,
    /// Legend border.
    pub legend_border: Color,
}

impl Theme {
    /// Light theme (default).
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            axis: Color::new(0.15, 0.15, 0.15, 1.0),
            grid_major: Color::new(0.0, 0.0, 0.0, 0.12),
            grid_minor: Color::new(0.0, 0.0, 0.0, 0.05),
            selection_fill: Color::from_rgba8(139, 0, 0, 30),
            selection_border: Color::from_rgb8(139, 0, 0),
            tracker_bg: Color::new(1.0, 1.0, 1.0, 0.85),
            legend_bg: Color::new(1.0, 1.0, 1.0, 0.9),
            legend_border: Color::new(0.0, 0.0, 0.0, 0.2),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.08, 0.09, 0.1, 1.0),
            axis: Color::new(0.85, 0.87, 0.9, 1.0),
            grid_major: Color::new(1.0, 1.0, 1.0, 0.12),
            grid_minor: Color::new(1.0, 1.0, 1.0, 0.05),
            selection_fill: Color::from_rgba8(255, 90, 90, 40),
            selection_border: Color::from_rgb8(255, 90, 90),
            tracker_bg: Color::new(0.1, 0.1, 0.12, 0.85),
            legend_bg: Color::new(0.1, 0.1, 0.12, 0.9),
            legend_border: Color::new(1.0, 1.0, 1.0, 0.2),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_budget_split_by_series() {
        assert_eq!(shared_fill_alpha(1), 127);
        assert_eq!(shared_fill_alpha(2), 63);
        assert_eq!(shared_outline_alpha(1), 255);
        assert_eq!(shared_outline_alpha(4), 63);
        assert_eq!(shared_fill_alpha(0), 127);
    }

    #[test]
    fn outline_alpha_is_capped() {
        assert_eq!(outline_alpha_for_fill(0), 0);
        assert_eq!(outline_alpha_for_fill(100), 150);
        assert_eq!(outline_alpha_for_fill(171), 255);
        assert_eq!(outline_alpha_for_fill(255), 255);
    }

    #[test]
    fn palette_wraps() {
        let first = default_curve_style(0, 2);
        let wrapped = default_curve_style(12, 2);
        assert_eq!(first.pen.color, wrapped.pen.color);
        assert_eq!(first.brush.alpha8(), 63);
    }
}
