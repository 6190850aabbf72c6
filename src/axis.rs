//! Axis configuration, scaling, and tick layout.

use std::sync::Arc;

use crate::view::Range;

#[cfg(feature = "gpui")]
const TARGET_TICK_SPACING_PX: f64 = 80.0;
#[cfg(feature = "gpui")]
const MIN_DECADE_SPACING_PX: f64 = 24.0;
#[cfg(feature = "gpui")]
const LINEAR_MINOR_DIVISIONS: f64 = 5.0;

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
}

impl AxisScale {
    /// Map a value into axis space.
    pub fn map_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => (value > 0.0).then(|| value.log10()),
        }
    }

    /// Invert a value from axis space back into data space.
    pub fn invert_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => Some(10_f64.powf(value)),
        }
    }

    /// Check whether a data range is valid for this scale.
    pub fn is_range_valid(self, range: Range) -> bool {
        if !range.is_finite() {
            return false;
        }
        match self {
            Self::Linear => true,
            Self::Log10 => range.min > 0.0 && range.max > 0.0,
        }
    }
}

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Numeric formatter that adapts precision to the tick step.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a tick value; `step` is the spacing between major ticks.
    pub fn format_tick(&self, value: f64, step: f64) -> String {
        match self {
            Self::Default => format_with_step(value, step),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// Per-axis configuration.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    scale: AxisScale,
    title: Option<String>,
    units: Option<String>,
    formatter: AxisFormatter,
    label_size: f32,
    show_grid: bool,
}

impl AxisConfig {
    /// Create a new axis configuration.
    pub fn new(scale: AxisScale) -> Self {
        Self {
            scale,
            title: None,
            units: None,
            formatter: AxisFormatter::default(),
            label_size: 12.0,
            show_grid: true,
        }
    }

    /// Create a linear axis configuration.
    pub fn linear() -> Self {
        Self::new(AxisScale::Linear)
    }

    /// Create a log10 axis configuration.
    pub fn log10() -> Self {
        Self::new(AxisScale::Log10)
    }

    /// Access the axis scale.
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Replace the axis scale in place.
    pub fn set_scale(&mut self, scale: AxisScale) {
        self.scale = scale;
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the axis units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Set the tick label formatter.
    pub fn with_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Toggle grid lines for this axis.
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Replace the axis title in place.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Access the axis units.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Title and units joined for display.
    pub fn display_title(&self) -> Option<String> {
        match (self.title(), self.units()) {
            (Some(title), Some(units)) => Some(format!("{title} ({units})")),
            (Some(title), None) => Some(title.to_string()),
            (None, Some(units)) => Some(units.to_string()),
            (None, None) => None,
        }
    }

    /// Access the formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }

    /// Font size for tick labels and titles.
    pub fn label_size(&self) -> f32 {
        self.label_size
    }

    /// Whether grid lines are drawn.
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::linear()
    }
}

#[cfg(feature = "gpui")]
/// Measures rendered text. Implemented by render backends.
pub(crate) trait TextMeasurer {
    /// Width and height of a single line of text at the given font size.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

#[cfg(feature = "gpui")]
/// A single axis tick.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AxisTick {
    pub(crate) value: f64,
    pub(crate) label: String,
    pub(crate) is_major: bool,
}

#[cfg(feature = "gpui")]
/// Ticks plus the largest label footprint, used to size axis gutters.
#[derive(Debug, Clone, Default)]
pub(crate) struct AxisLayout {
    pub(crate) ticks: Vec<AxisTick>,
    pub(crate) max_label_size: (f32, f32),
}

#[cfg(feature = "gpui")]
#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    range: Range,
    pixels: u32,
    scale: AxisScale,
}

#[cfg(feature = "gpui")]
/// Reuses the last layout while the range, pixel length and scale are unchanged.
#[derive(Debug, Clone, Default)]
pub(crate) struct AxisLayoutCache {
    key: Option<LayoutKey>,
    layout: AxisLayout,
}

#[cfg(feature = "gpui")]
impl AxisLayoutCache {
    pub(crate) fn update(
        &mut self,
        axis: &AxisConfig,
        range: Range,
        pixels: u32,
        measurer: &dyn TextMeasurer,
    ) -> &AxisLayout {
        let key = LayoutKey {
            range,
            pixels,
            scale: axis.scale(),
        };
        if self.key.as_ref() != Some(&key) {
            let ticks = generate_ticks(axis, range, pixels as f64);
            let mut max_label_size = (0.0_f32, 0.0_f32);
            for tick in ticks.iter().filter(|tick| tick.is_major) {
                let size = measurer.measure(&tick.label, axis.label_size());
                max_label_size.0 = max_label_size.0.max(size.0);
                max_label_size.1 = max_label_size.1.max(size.1);
            }
            self.layout = AxisLayout {
                ticks,
                max_label_size,
            };
            self.key = Some(key);
        }
        &self.layout
    }
}

#[cfg(feature = "gpui")]
/// Generate major and minor ticks covering `range` for an axis `pixels` long.
pub(crate) fn generate_ticks(axis: &AxisConfig, range: Range, pixels: f64) -> Vec<AxisTick> {
    if !axis.scale().is_range_valid(range) || pixels <= 0.0 {
        return Vec::new();
    }
    match axis.scale() {
        AxisScale::Linear => linear_ticks(axis.formatter(), range, pixels),
        AxisScale::Log10 => log_ticks(axis.formatter(), range, pixels),
    }
}

#[cfg(feature = "gpui")]
fn linear_ticks(formatter: &AxisFormatter, range: Range, pixels: f64) -> Vec<AxisTick> {
    let span = range.span();
    if span <= 0.0 {
        return vec![AxisTick {
            value: range.min,
            label: formatter.format_tick(range.min, 1.0),
            is_major: true,
        }];
    }
    let target = (pixels / TARGET_TICK_SPACING_PX).max(2.0);
    let step = nice_step(span / target);
    let minor_step = step / LINEAR_MINOR_DIVISIONS;

    let mut ticks = Vec::new();
    let first = (range.min / minor_step).ceil() as i64;
    let last = (range.max / minor_step).floor() as i64;
    for index in first..=last {
        let value = index as f64 * minor_step;
        let is_major = index.rem_euclid(LINEAR_MINOR_DIVISIONS as i64) == 0;
        // Snap values that should be zero but picked up rounding noise.
        let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
        ticks.push(AxisTick {
            value,
            label: if is_major {
                formatter.format_tick(value, step)
            } else {
                String::new()
            },
            is_major,
        });
    }
    ticks
}

#[cfg(feature = "gpui")]
fn log_ticks(formatter: &AxisFormatter, range: Range, pixels: f64) -> Vec<AxisTick> {
    let lo = range.min.log10().floor() as i32;
    let hi = range.max.log10().ceil() as i32;
    let decades = (hi - lo).max(1) as f64;
    let stride = (decades * MIN_DECADE_SPACING_PX / pixels).ceil().max(1.0) as i32;
    let show_minor = stride == 1;

    let mut ticks = Vec::new();
    for exponent in lo..=hi {
        let decade = 10_f64.powi(exponent);
        if (exponent - lo) % stride == 0 && range.contains(decade) {
            ticks.push(AxisTick {
                value: decade,
                label: formatter.format_tick(decade, decade),
                is_major: true,
            });
        }
        if show_minor {
            for multiple in 2..10 {
                let value = decade * multiple as f64;
                if range.contains(value) {
                    ticks.push(AxisTick {
                        value,
                        label: String::new(),
                        is_major: false,
                    });
                }
            }
        }
    }
    ticks
}

#[cfg(feature = "gpui")]
/// Round a raw step to 1, 2 or 5 times a power of ten.
pub(crate) fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_with_step(value: f64, step: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e6).contains(&magnitude) {
        return format!("{value:.0e}");
    }
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{value:.decimals$}")
}
