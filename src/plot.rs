//! Histogram plot model and builder.
//!
//! [`HistogramPlot`] owns everything a histogram display needs: the shared
//! [`BinLayout`], one [`HistogramSeries`] per input stream, axis
//! configuration, the zoom history and the display mode flags. It is
//! backend-agnostic; the GPUI view only reads it to build frames and calls
//! the zoom methods in response to mouse input.

use tracing::{debug, trace, warn};

use crate::axis::{AxisConfig, AxisScale};
use crate::bins::{BinLayout, DEFAULT_BINS};
use crate::config::HistogramConfig;
use crate::error::HistogramError;
use crate::interaction::ZoomStack;
use crate::render::{Color, MarkerShape, MarkerStyle};
use crate::series::{HistogramSeries, SeriesId};
use crate::style::{
    Theme, default_curve_style, outline_alpha_for_fill, shared_fill_alpha, shared_outline_alpha,
};
use crate::view::{Range, Viewport};

/// Left edge of the value axis while it is logarithmic.
pub const LOG_X_FLOOR: f64 = 1e-1;
/// Bottom of the count axis after switching it to logarithmic.
pub const LOG_Y_FLOOR: f64 = 1e-10;

const AUTOSCALE_MARGIN: f64 = 0.2;
const LOG_AUTOSCALE_MARGIN: f64 = 10.0;
const LOG_AUTOSCALE_FLOOR: f64 = 1e-3;
const MARKER_SIZE: f32 = 7.0;

/// Streaming histogram with shared bins across several series.
#[derive(Debug, Clone)]
pub struct HistogramPlot {
    theme: Theme,
    layout: BinLayout,
    series: Vec<HistogramSeries>,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    zoom: ZoomStack,
    autoscale_y: bool,
    autoscale_x_pending: bool,
    accumulate: bool,
    stopped: bool,
    observed: Option<Range>,
    generation: u64,
}

impl HistogramPlot {
    /// Create a plot with `series` inputs and default settings.
    pub fn new(series: usize) -> Self {
        let layout = BinLayout::default();
        let y = Range::new(-2.0, DEFAULT_BINS as f64);
        Self::from_parts(
            Theme::default(),
            layout,
            series,
            AxisConfig::linear().with_title("Value"),
            AxisConfig::linear().with_title("Count"),
            y,
        )
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> HistogramPlotBuilder {
        HistogramPlotBuilder::default()
    }

    /// Build a plot from serialized settings.
    pub fn from_config(config: &HistogramConfig) -> Result<Self, HistogramError> {
        let mut builder = Self::builder()
            .bins(config.bins)
            .series(config.series)
            .x_range(config.x_range[0], config.x_range[1])
            .accumulate(config.accumulate)
            .autoscale_y(config.autoscale_y)
            .semilog_x(config.semilog_x)
            .semilog_y(config.semilog_y)
            .x_axis(AxisConfig::linear().with_title(config.x_title.clone()))
            .y_axis(AxisConfig::linear().with_title(config.y_title.clone()));
        for (index, label) in config.labels.iter().enumerate() {
            builder = builder.label(index, label.clone());
        }
        builder.build()
    }

    fn from_parts(
        theme: Theme,
        layout: BinLayout,
        series: usize,
        x_axis: AxisConfig,
        y_axis: AxisConfig,
        y: Range,
    ) -> Self {
        let bins = layout.bins();
        let series = (0..series)
            .map(|index| {
                HistogramSeries::new(
                    format!("Data {index}"),
                    bins,
                    default_curve_style(index, series),
                )
            })
            .collect();
        let base = Viewport::new(Range::new(layout.left(), layout.right()), y);
        Self {
            theme,
            layout,
            series,
            x_axis,
            y_axis,
            zoom: ZoomStack::new(base),
            autoscale_y: true,
            autoscale_x_pending: false,
            accumulate: false,
            stopped: false,
            observed: None,
            generation: 0,
        }
    }

    /// Feed one block of samples per series.
    ///
    /// Each block contributes its first `num_points` samples (or all of them
    /// if shorter); blocks beyond the series count are ignored. Samples
    /// outside the bin range are dropped. `time_interval` is informational.
    ///
    /// Fails only while an X autoscale is pending and the block's extrema do
    /// not form a valid range; the request then stays pending.
    pub fn plot_new_data<S: AsRef<[f64]>>(
        &mut self,
        blocks: &[S],
        num_points: usize,
        time_interval: f64,
    ) -> Result<(), HistogramError> {
        if self.stopped || num_points == 0 {
            return Ok(());
        }
        let blocks: Vec<&[f64]> = blocks
            .iter()
            .take(self.series.len())
            .map(|block| {
                let block = block.as_ref();
                &block[..num_points.min(block.len())]
            })
            .collect();
        if blocks.iter().all(|block| block.is_empty()) {
            return Ok(());
        }
        trace!(
            series = blocks.len(),
            num_points,
            time_interval,
            "histogram update"
        );

        let (min, max) = extrema(&blocks);
        self.observed = (min <= max).then(|| Range::new(min, max));

        if self.autoscale_x_pending {
            self.clear();
            if let Err(err) = self.reset_x_axis_points(min, max) {
                warn!(%err, "cannot autoscale value axis from this block");
                return Err(err);
            }
            self.autoscale_x_pending = false;
        }

        if !self.accumulate {
            self.clear();
        }

        let layout = &self.layout;
        for (series, block) in self.series.iter_mut().zip(&blocks) {
            for &value in *block {
                if let Some(bin) = layout.index_of(value) {
                    series.increment(bin);
                }
            }
        }

        if self.autoscale_y {
            let height = self.max_count();
            self.autoscale_y_range(0.0, height);
        }

        self.replot();
        Ok(())
    }

    /// Set the requested value range and rebuild the bins.
    ///
    /// Counts are kept; the zoom history is reset to the new full range.
    pub fn set_x_axis(&mut self, min: f64, max: f64) -> Result<(), HistogramError> {
        self.reset_x_axis_points(min, max)?;
        self.replot();
        Ok(())
    }

    fn reset_x_axis_points(&mut self, left: f64, right: f64) -> Result<(), HistogramError> {
        self.layout.rebuild(left, right)?;
        debug!(
            left = self.layout.left(),
            right = self.layout.right(),
            width = self.layout.width(),
            "rebuilt histogram bins"
        );
        self.reset_zoom_base_x();
        Ok(())
    }

    fn reset_zoom_base_x(&mut self) {
        let left = if self.is_semilog_x() {
            LOG_X_FLOOR
        } else {
            self.layout.left()
        };
        let mut base = self.zoom.base();
        base.x = Range::new(left, self.layout.right());
        self.zoom.set_base(base);
    }

    /// Set the count axis range.
    pub fn set_y_axis(&mut self, min: f64, max: f64) {
        self.zoom.set_base_y(Range::new(min, max));
        self.replot();
    }

    fn autoscale_y_range(&mut self, bottom: f64, top: f64) {
        let b = bottom - bottom.abs() * AUTOSCALE_MARGIN;
        let t = top + top.abs() * AUTOSCALE_MARGIN;
        let (min, max) = if self.is_semilog_y() {
            if bottom > 0.0 {
                (b - LOG_AUTOSCALE_MARGIN, t + LOG_AUTOSCALE_MARGIN)
            } else {
                (LOG_AUTOSCALE_FLOOR, t + LOG_AUTOSCALE_MARGIN)
            }
        } else {
            (b, t)
        };
        self.zoom.set_base_y(Range::new(min, max));
    }

    /// Change the bin count. All counts are reset.
    pub fn set_num_bins(&mut self, bins: usize) -> Result<(), HistogramError> {
        self.layout.resize(bins)?;
        for series in &mut self.series {
            series.reset_bins(bins);
        }
        debug!(bins, width = self.layout.width(), "changed histogram bin count");
        self.reset_zoom_base_x();
        self.replot();
        Ok(())
    }

    /// Zero every bin of every series. Ignored while stopped.
    pub fn clear(&mut self) {
        if self.stopped {
            return;
        }
        for series in &mut self.series {
            series.clear();
        }
    }

    /// Mark the plot as changed so renderers redraw it.
    pub fn replot(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Set outline, fill and marker color for series `which`.
    ///
    /// Fill and outline alpha are split evenly between all series.
    pub fn set_line_color(&mut self, which: usize, color: Color) {
        let count = self.series.len();
        let Some(series) = self.series.get_mut(which) else {
            return;
        };
        let style = series.style_mut();
        style.brush = color.with_alpha8(shared_fill_alpha(count));
        style.pen.color = color.with_alpha8(shared_outline_alpha(count));
        if let Some(marker) = style.marker.as_mut() {
            marker.color = style.pen.color;
        }
        self.replot();
    }

    /// Outline color of series `which`.
    pub fn line_color(&self, which: usize) -> Option<Color> {
        self.series.get(which).map(|series| series.style().pen.color)
    }

    /// Set the fill alpha of series `which`; outline and marker get 1.5x.
    pub fn set_marker_alpha(&mut self, which: usize, alpha: u8) {
        let Some(series) = self.series.get_mut(which) else {
            return;
        };
        let style = series.style_mut();
        style.brush = style.brush.with_alpha8(alpha);
        style.pen.color = style.brush.with_alpha8(outline_alpha_for_fill(alpha));
        if let Some(marker) = style.marker.as_mut() {
            marker.color = style.pen.color;
        }
        self.replot();
    }

    /// Fill alpha of series `which`, or 0 when there is no such series.
    pub fn marker_alpha(&self, which: usize) -> u8 {
        self.series
            .get(which)
            .map_or(0, |series| series.style().brush.alpha8())
    }

    /// Set the outline width of series `which`.
    pub fn set_line_width(&mut self, which: usize, width: f32) {
        if let Some(series) = self.series.get_mut(which) {
            series.style_mut().pen.width = width;
            self.replot();
        }
    }

    /// Show a marker at each bin center of series `which`, or hide it.
    pub fn set_line_marker(&mut self, which: usize, shape: Option<MarkerShape>) {
        let Some(series) = self.series.get_mut(which) else {
            return;
        };
        let style = series.style_mut();
        style.marker = shape.map(|shape| MarkerStyle {
            color: style.pen.color,
            size: MARKER_SIZE,
            shape,
        });
        self.replot();
    }

    /// Rename series `which`.
    pub fn set_line_label(&mut self, which: usize, label: impl Into<String>) {
        if let Some(series) = self.series.get_mut(which) {
            series.set_name(label);
            self.replot();
        }
    }

    /// Label of series `which`.
    pub fn line_label(&self, which: usize) -> Option<&str> {
        self.series.get(which).map(HistogramSeries::name)
    }

    /// Show or hide series `which`.
    pub fn set_series_visible(&mut self, which: usize, visible: bool) {
        if let Some(series) = self.series.get_mut(which) {
            series.set_visible(visible);
            self.replot();
        }
    }

    /// Flip the visibility of the series with the given id.
    pub fn toggle_series(&mut self, id: SeriesId) {
        if let Some(series) = self.series.iter_mut().find(|series| series.id() == id) {
            series.set_visible(!series.is_visible());
            self.replot();
        }
    }

    /// Rescale the count axis after every update.
    pub fn set_autoscale(&mut self, state: bool) {
        self.autoscale_y = state;
    }

    /// Whether the count axis follows the data.
    pub fn autoscale(&self) -> bool {
        self.autoscale_y
    }

    /// Rebuild the bins from the extrema of the next non-empty update.
    pub fn set_autoscale_x(&mut self) {
        self.autoscale_x_pending = true;
    }

    /// Whether an X autoscale is waiting for the next update.
    pub fn autoscale_x_pending(&self) -> bool {
        self.autoscale_x_pending
    }

    /// Keep counts across updates instead of resetting them each time.
    pub fn set_accumulate(&mut self, state: bool) {
        self.accumulate = state;
    }

    /// Whether counts persist across updates.
    pub fn accumulate(&self) -> bool {
        self.accumulate
    }

    /// Switch the value axis between linear and log10.
    pub fn set_semilog_x(&mut self, enabled: bool) {
        let scale = if enabled {
            AxisScale::Log10
        } else {
            AxisScale::Linear
        };
        if self.x_axis.scale() == scale {
            return;
        }
        self.x_axis.set_scale(scale);
        debug!(enabled, "value axis log scale");
        self.reset_zoom_base_x();
        self.replot();
    }

    /// Whether the value axis is logarithmic.
    pub fn is_semilog_x(&self) -> bool {
        self.x_axis.scale() == AxisScale::Log10
    }

    /// Switch the count axis between linear and log10.
    ///
    /// The current upper bound `max` is remapped so the view keeps a
    /// comparable extent: `[-10^(max/10), 10^(max/10)]` going linear and
    /// `[1e-10, 10 log10(100 max)]` going logarithmic.
    pub fn set_semilog_y(&mut self, enabled: bool) {
        if self.is_semilog_y() == enabled {
            return;
        }
        let max = self.zoom.current().y.max;
        let y = if enabled {
            let max = if max > 0.0 { max } else { 1.0 };
            self.y_axis.set_scale(AxisScale::Log10);
            Range::new(LOG_Y_FLOOR, 10.0 * (100.0 * max).log10())
        } else {
            self.y_axis.set_scale(AxisScale::Linear);
            let extent = 10_f64.powf(max / 10.0);
            Range::new(-extent, extent)
        };
        debug!(enabled, min = y.min, max = y.max, "count axis log scale");
        self.zoom.set_base_y(y);
        self.zoom.zoom_to_base();
        self.replot();
    }

    /// Whether the count axis is logarithmic.
    pub fn is_semilog_y(&self) -> bool {
        self.y_axis.scale() == AxisScale::Log10
    }

    /// Freeze the plot: updates and clears become no-ops.
    pub fn set_stop(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    /// Whether updates are ignored.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Set the value axis title.
    pub fn set_x_title(&mut self, title: impl Into<String>) {
        self.x_axis.set_title(title);
        self.replot();
    }

    /// Set the count axis title.
    pub fn set_y_title(&mut self, title: impl Into<String>) {
        self.y_axis.set_title(title);
        self.replot();
    }

    /// Push a zoom level (rubber band zoom).
    pub fn zoom_in(&mut self, viewport: Viewport) {
        self.zoom.zoom_in(viewport);
        self.replot();
    }

    /// Step back one zoom level.
    pub fn zoom_out(&mut self) {
        if self.zoom.zoom_out() {
            self.replot();
        }
    }

    /// Return to the fully zoomed-out view.
    pub fn zoom_to_base(&mut self) {
        self.zoom.zoom_to_base();
        self.replot();
    }

    /// Replace the visible viewport (pan and wheel zoom).
    pub fn set_view(&mut self, viewport: Viewport) {
        self.zoom.replace_current(viewport);
        self.replot();
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.replot();
    }

    /// Access the value axis configuration.
    pub fn x_axis(&self) -> &AxisConfig {
        &self.x_axis
    }

    /// Access the count axis configuration.
    pub fn y_axis(&self) -> &AxisConfig {
        &self.y_axis
    }

    /// Access the shared bin layout.
    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.layout.bins()
    }

    /// X coordinate of each bin.
    pub fn bin_positions(&self) -> &[f64] {
        self.layout.positions()
    }

    /// All series.
    pub fn series(&self) -> &[HistogramSeries] {
        &self.series
    }

    /// Bin counts of series `which`.
    pub fn counts(&self, which: usize) -> Option<&[f64]> {
        self.series.get(which).map(HistogramSeries::counts)
    }

    /// Largest count across all series.
    pub fn max_count(&self) -> f64 {
        self.series
            .iter()
            .map(HistogramSeries::max_count)
            .fold(0.0, f64::max)
    }

    /// Finite extrema of the last update, if it had any finite samples.
    pub fn observed_range(&self) -> Option<Range> {
        self.observed
    }

    /// The visible viewport.
    pub fn viewport(&self) -> Viewport {
        self.zoom.current()
    }

    /// Access the zoom history.
    pub fn zoom(&self) -> &ZoomStack {
        &self.zoom
    }

    /// Change counter, bumped on every replot.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for HistogramPlot {
    fn default() -> Self {
        Self::new(1)
    }
}

fn extrema(blocks: &[&[f64]]) -> (f64, f64) {
    blocks
        .iter()
        .flat_map(|block| block.iter().copied())
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        })
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Clone)]
pub struct HistogramPlotBuilder {
    theme: Theme,
    bins: usize,
    series: usize,
    x_range: (f64, f64),
    accumulate: bool,
    autoscale_y: bool,
    semilog_x: bool,
    semilog_y: bool,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    labels: Vec<(usize, String)>,
}

impl Default for HistogramPlotBuilder {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            bins: DEFAULT_BINS,
            series: 1,
            x_range: (-1.0, 1.0),
            accumulate: false,
            autoscale_y: true,
            semilog_x: false,
            semilog_y: false,
            x_axis: AxisConfig::linear().with_title("Value"),
            y_axis: AxisConfig::linear().with_title("Count"),
            labels: Vec::new(),
        }
    }
}

impl HistogramPlotBuilder {
    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the number of bins.
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Set the number of input series.
    pub fn series(mut self, series: usize) -> Self {
        self.series = series;
        self
    }

    /// Set the requested value range (padded by 10% on build).
    pub fn x_range(mut self, left: f64, right: f64) -> Self {
        self.x_range = (left, right);
        self
    }

    /// Start in accumulate mode.
    pub fn accumulate(mut self, state: bool) -> Self {
        self.accumulate = state;
        self
    }

    /// Enable or disable count axis autoscaling.
    pub fn autoscale_y(mut self, state: bool) -> Self {
        self.autoscale_y = state;
        self
    }

    /// Start with a logarithmic value axis.
    pub fn semilog_x(mut self, enabled: bool) -> Self {
        self.semilog_x = enabled;
        self
    }

    /// Start with a logarithmic count axis.
    pub fn semilog_y(mut self, enabled: bool) -> Self {
        self.semilog_y = enabled;
        self
    }

    /// Set the value axis configuration. Its scale is overridden by
    /// [`semilog_x`](Self::semilog_x).
    pub fn x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    /// Set the count axis configuration. Its scale is overridden by
    /// [`semilog_y`](Self::semilog_y).
    pub fn y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    /// Label series `index`.
    pub fn label(mut self, index: usize, label: impl Into<String>) -> Self {
        self.labels.push((index, label.into()));
        self
    }

    /// Build the plot.
    pub fn build(self) -> Result<HistogramPlot, HistogramError> {
        let layout = BinLayout::new(self.bins, self.x_range.0, self.x_range.1)?;
        let mut x_axis = self.x_axis;
        let mut y_axis = self.y_axis;
        x_axis.set_scale(AxisScale::Linear);
        y_axis.set_scale(AxisScale::Linear);
        let y = Range::new(-2.0, self.bins as f64);
        let mut plot =
            HistogramPlot::from_parts(self.theme, layout, self.series, x_axis, y_axis, y);
        plot.accumulate = self.accumulate;
        plot.autoscale_y = self.autoscale_y;
        for (index, label) in self.labels {
            plot.set_line_label(index, label);
        }
        plot.set_semilog_x(self.semilog_x);
        plot.set_semilog_y(self.semilog_y);
        Ok(plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot(bins: usize, series: usize) -> HistogramPlot {
        HistogramPlot::builder()
            .bins(bins)
            .series(series)
            .x_range(-1.0, 1.0)
            .build()
            .expect("valid plot")
    }

    #[test]
    fn defaults_match_display_conventions() {
        let plot = HistogramPlot::new(2);
        assert_eq!(plot.bins(), DEFAULT_BINS);
        assert!(plot.autoscale());
        assert!(!plot.accumulate());
        assert!(!plot.is_semilog_x());
        assert!(!plot.is_semilog_y());
        assert_eq!(plot.viewport().y, Range::new(-2.0, DEFAULT_BINS as f64));
        assert!((plot.viewport().x.min - -1.1).abs() < 1e-12);
        assert!((plot.viewport().x.max - 1.1).abs() < 1e-12);
        assert_eq!(plot.line_label(1), Some("Data 1"));
        assert_eq!(plot.marker_alpha(0), 63);
        assert_eq!(plot.line_color(0).map(|c| c.alpha8()), Some(255));
        assert_eq!(plot.x_axis().title(), Some("Value"));
        assert_eq!(plot.y_axis().title(), Some("Count"));
    }

    #[test]
    fn samples_land_in_bins() {
        let mut plot = plot(10, 1);
        let left = plot.layout().left();
        let right = plot.layout().right();
        let block = [left, left, 0.0, right, 5.0, f64::NAN];
        plot.plot_new_data(&[block], block.len(), 0.1).unwrap();
        let counts = plot.counts(0).unwrap();
        assert_eq!(counts[0], 2.0);
        assert_eq!(counts.iter().sum::<f64>(), 3.0);
        assert_eq!(counts[5], 1.0);
    }

    #[test]
    fn reset_mode_replaces_counts_each_update() {
        let mut plot = plot(10, 1);
        let block = [0.0, 0.1, 0.2, 0.5];
        plot.plot_new_data(&[block], 4, 0.0).unwrap();
        let once = plot.counts(0).unwrap().to_vec();
        plot.plot_new_data(&[block], 4, 0.0).unwrap();
        assert_eq!(plot.counts(0).unwrap(), once.as_slice());
    }

    #[test]
    fn accumulate_mode_sums_updates() {
        let mut plot = plot(10, 1);
        plot.set_accumulate(true);
        let block = [0.0, 0.1, 0.2, 0.5];
        plot.plot_new_data(&[block], 4, 0.0).unwrap();
        let once = plot.counts(0).unwrap().to_vec();
        plot.plot_new_data(&[block], 4, 0.0).unwrap();
        let twice: Vec<f64> = once.iter().map(|c| c * 2.0).collect();
        assert_eq!(plot.counts(0).unwrap(), twice.as_slice());
    }

    #[test]
    fn num_points_limits_each_block() {
        let mut plot = plot(10, 2);
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![0.5];
        plot.plot_new_data(&[a, b], 2, 0.0).unwrap();
        assert_eq!(plot.counts(0).unwrap().iter().sum::<f64>(), 2.0);
        assert_eq!(plot.counts(1).unwrap().iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn empty_update_and_stop_are_no_ops() {
        let mut plot = plot(10, 1);
        plot.plot_new_data(&[[0.0]], 1, 0.0).unwrap();
        let generation = plot.generation();

        plot.plot_new_data(&[[0.5]], 0, 0.0).unwrap();
        assert_eq!(plot.generation(), generation);

        plot.set_stop(true);
        plot.plot_new_data(&[[0.5, 0.5]], 2, 0.0).unwrap();
        plot.clear();
        assert_eq!(plot.counts(0).unwrap().iter().sum::<f64>(), 1.0);
        assert_eq!(plot.generation(), generation);

        plot.set_stop(false);
        plot.clear();
        assert_eq!(plot.counts(0).unwrap().iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn blocks_without_samples_keep_counts() {
        let mut plot = plot(10, 2);
        plot.plot_new_data(&[[0.0], [0.5]], 1, 0.0).unwrap();
        let generation = plot.generation();

        let empty: [&[f64]; 2] = [&[], &[]];
        plot.plot_new_data(&empty, 4, 0.0).unwrap();
        plot.plot_new_data(&[] as &[Vec<f64>], 4, 0.0).unwrap();

        assert!(!plot.accumulate());
        assert_eq!(plot.generation(), generation);
        assert_eq!(plot.counts(0).unwrap().iter().sum::<f64>(), 1.0);
        assert_eq!(plot.counts(1).unwrap().iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn autoscale_y_adds_twenty_percent() {
        let mut plot = plot(10, 1);
        plot.plot_new_data(&[[0.0; 10]], 10, 0.0).unwrap();
        let y = plot.viewport().y;
        assert_eq!(y.min, 0.0);
        assert!((y.max - 12.0).abs() < 1e-9);

        plot.set_autoscale(false);
        plot.plot_new_data(&[[0.0; 20]], 20, 0.0).unwrap();
        assert!((plot.viewport().y.max - 12.0).abs() < 1e-9);
    }

    #[test]
    fn autoscale_y_on_log_axis_uses_floor() {
        let mut plot = plot(10, 1);
        plot.set_semilog_y(true);
        plot.plot_new_data(&[[0.0; 10]], 10, 0.0).unwrap();
        let y = plot.viewport().y;
        assert_eq!(y.min, 1e-3);
        assert!((y.max - 22.0).abs() < 1e-9);
    }

    #[test]
    fn autoscale_x_is_one_shot() {
        let mut plot = plot(10, 1);
        plot.set_autoscale_x();
        assert!(plot.autoscale_x_pending());
        plot.plot_new_data(&[[2.0, 4.0, 3.0]], 3, 0.0).unwrap();
        assert!(!plot.autoscale_x_pending());
        assert!((plot.layout().left() - 1.8).abs() < 1e-12);
        assert!((plot.layout().right() - 4.4).abs() < 1e-12);
        assert_eq!(plot.observed_range(), Some(Range::new(2.0, 4.0)));

        plot.plot_new_data(&[[10.0, 20.0]], 2, 0.0).unwrap();
        assert!((plot.layout().right() - 4.4).abs() < 1e-12);
    }

    #[test]
    fn autoscale_x_on_constant_block_fails_and_stays_pending() {
        let mut plot = plot(10, 1);
        plot.set_autoscale_x();
        let err = plot.plot_new_data(&[[1.0, 1.0]], 2, 0.0).unwrap_err();
        assert_eq!(err, HistogramError::InvalidRange { left: 1.0, right: 1.0 });
        assert!(plot.autoscale_x_pending());
    }

    #[test]
    fn set_x_axis_rejects_bad_bounds() {
        let mut plot = plot(10, 1);
        assert!(plot.set_x_axis(1.0, 1.0).is_err());
        assert!(plot.set_x_axis(2.0, -2.0).is_err());
        assert!(plot.set_x_axis(0.0, 10.0).is_ok());
        assert!((plot.layout().right() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn set_x_axis_resets_zoom() {
        let mut plot = plot(10, 1);
        plot.zoom_in(Viewport::new(Range::new(0.0, 0.5), Range::new(0.0, 1.0)));
        assert!(!plot.zoom().is_at_base());
        plot.set_x_axis(-5.0, 5.0).unwrap();
        assert!(plot.zoom().is_at_base());
        assert!((plot.viewport().x.min - -5.5).abs() < 1e-12);
        assert!((plot.viewport().x.max - 5.5).abs() < 1e-12);
    }

    #[test]
    fn log_x_uses_positive_floor() {
        let mut plot = plot(10, 1);
        plot.set_semilog_x(true);
        assert_eq!(plot.viewport().x.min, LOG_X_FLOOR);
        plot.set_x_axis(-3.0, 30.0).unwrap();
        assert_eq!(plot.viewport().x.min, LOG_X_FLOOR);
        assert!((plot.viewport().x.max - 33.0).abs() < 1e-9);
        plot.set_semilog_x(false);
        assert!((plot.viewport().x.min - -3.3).abs() < 1e-12);
    }

    #[test]
    fn set_num_bins_resizes_and_clears() {
        let mut plot = plot(10, 2);
        plot.set_accumulate(true);
        plot.plot_new_data(&[[0.0, 0.1], [0.2, 0.3]], 2, 0.0).unwrap();
        plot.set_num_bins(32).unwrap();
        assert_eq!(plot.bin_positions().len(), 32);
        for series in plot.series() {
            assert_eq!(series.counts().len(), 32);
            assert!(series.counts().iter().all(|&c| c == 0.0));
        }
        assert!((plot.layout().left() - -1.21).abs() < 1e-12);
        assert!((plot.viewport().x.max - 1.21).abs() < 1e-12);
        assert_eq!(plot.set_num_bins(0), Err(HistogramError::ZeroBins));
    }

    #[test]
    fn marker_alpha_roundtrip_and_cap() {
        let mut plot = plot(10, 2);
        plot.set_marker_alpha(1, 0);
        assert_eq!(plot.marker_alpha(1), 0);
        assert_eq!(plot.line_color(1).unwrap().alpha8(), 0);

        plot.set_marker_alpha(1, 255);
        assert_eq!(plot.marker_alpha(1), 255);
        assert_eq!(plot.line_color(1).unwrap().alpha8(), 255);

        plot.set_marker_alpha(0, 100);
        assert_eq!(plot.line_color(0).unwrap().alpha8(), 150);

        assert_eq!(plot.marker_alpha(7), 0);
        plot.set_marker_alpha(7, 10);
    }

    #[test]
    fn line_color_splits_alpha_and_updates_marker() {
        let mut plot = plot(10, 3);
        plot.set_line_marker(2, Some(MarkerShape::Square));
        plot.set_line_color(2, Color::from_rgb8(10, 20, 30));
        let style = plot.series()[2].style();
        assert_eq!(style.brush.alpha8(), 42);
        assert_eq!(style.pen.color.alpha8(), 85);
        let marker = style.marker.expect("marker set");
        assert_eq!(marker.color, style.pen.color);
        assert_eq!(marker.shape, MarkerShape::Square);

        plot.set_line_color(9, Color::WHITE);
    }

    #[test]
    fn semilog_y_remaps_upper_bound() {
        let mut plot = plot(10, 1);
        plot.set_y_axis(0.0, 100.0);
        plot.set_semilog_y(true);
        let y = plot.viewport().y;
        assert_eq!(y.min, LOG_Y_FLOOR);
        assert!((y.max - 40.0).abs() < 1e-9);

        let generation = plot.generation();
        plot.set_semilog_y(true);
        assert_eq!(plot.generation(), generation);

        plot.set_semilog_y(false);
        let y = plot.viewport().y;
        assert!((y.max - 10_000.0).abs() < 1e-6);
        assert!((y.min + 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn from_config_applies_settings() {
        let config = HistogramConfig {
            bins: 16,
            series: 2,
            x_range: [0.0, 8.0],
            accumulate: true,
            semilog_y: true,
            labels: vec!["I".into()],
            ..HistogramConfig::default()
        };
        let plot = HistogramPlot::from_config(&config).unwrap();
        assert_eq!(plot.bins(), 16);
        assert_eq!(plot.series().len(), 2);
        assert!(plot.accumulate());
        assert!(plot.is_semilog_y());
        assert_eq!(plot.line_label(0), Some("I"));
        assert_eq!(plot.line_label(1), Some("Data 1"));

        let bad = HistogramConfig {
            x_range: [3.0, 3.0],
            ..HistogramConfig::default()
        };
        assert!(HistogramPlot::from_config(&bad).is_err());
    }

    #[test]
    fn toggle_series_by_id() {
        let mut plot = plot(10, 2);
        let id = plot.series()[1].id();
        plot.toggle_series(id);
        assert!(!plot.series()[1].is_visible());
        plot.toggle_series(id);
        assert!(plot.series()[1].is_visible());
    }
}
