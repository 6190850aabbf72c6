/// Configuration for the GPUI histogram view.
#[derive(Debug, Clone)]
pub struct PlotViewConfig {
    /// Pixel threshold before a press turns into a drag.
    pub drag_threshold_px: f32,
    /// Zoom change per scrolled pixel.
    pub wheel_zoom_speed: f64,
    /// Show legend overlay.
    pub show_legend: bool,
    /// Show the cursor position readout.
    pub show_tracker: bool,
}

impl Default for PlotViewConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 4.0,
            wheel_zoom_speed: 0.002,
            show_legend: true,
            show_tracker: true,
        }
    }
}
