pub(crate) const AXIS_PADDING: f32 = 6.0;
pub(crate) const TICK_LENGTH_MAJOR: f32 = 6.0;
pub(crate) const TICK_LENGTH_MINOR: f32 = 3.0;

pub(crate) const TRACKER_FONT_SIZE: f32 = 12.0;
pub(crate) const TRACKER_OFFSET: f32 = 12.0;

pub(crate) const LEGEND_FONT_SIZE: f32 = 12.0;
pub(crate) const LEGEND_LINE_HEIGHT: f32 = 18.0;
pub(crate) const LEGEND_PADDING: f32 = 6.0;
pub(crate) const LEGEND_SWATCH_WIDTH: f32 = 14.0;
pub(crate) const LEGEND_SWATCH_HEIGHT: f32 = 10.0;
pub(crate) const LEGEND_SWATCH_GAP: f32 = 6.0;
pub(crate) const LEGEND_HIDDEN_ALPHA: f32 = 0.35;

pub(crate) const WHEEL_LINE_HEIGHT: f32 = 16.0;
