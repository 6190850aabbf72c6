//! Per-series bin counts and curve styling.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::render::{Color, LineStyle, MarkerStyle};

static SERIES_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(SERIES_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a series is drawn.
///
/// `pen` strokes the outline, `brush` fills the bars and `marker` (if any)
/// is drawn at each bin center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    /// Outline stroke.
    pub pen: LineStyle,
    /// Bar fill.
    pub brush: Color,
    /// Optional marker at bin centers.
    pub marker: Option<MarkerStyle>,
}

/// One input stream of the histogram and its bin counts.
#[derive(Debug, Clone)]
pub struct HistogramSeries {
    id: SeriesId,
    name: String,
    counts: Vec<f64>,
    style: CurveStyle,
    visible: bool,
}

impl HistogramSeries {
    pub(crate) fn new(name: impl Into<String>, bins: usize, style: CurveStyle) -> Self {
        Self {
            id: SeriesId::next(),
            name: name.into(),
            counts: vec![0.0; bins],
            style,
            visible: true,
        }
    }

    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series label.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Count per bin.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Largest bin count, or 0 for an empty series.
    pub fn max_count(&self) -> f64 {
        self.counts.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    pub(crate) fn increment(&mut self, bin: usize) {
        if let Some(count) = self.counts.get_mut(bin) {
            *count += 1.0;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.counts.fill(0.0);
    }

    /// Drop all counts and resize to `bins` zeroed bins.
    pub(crate) fn reset_bins(&mut self, bins: usize) {
        self.counts.clear();
        self.counts.resize(bins, 0.0);
    }

    /// Access the curve style.
    pub fn style(&self) -> &CurveStyle {
        &self.style
    }

    pub(crate) fn style_mut(&mut self) -> &mut CurveStyle {
        &mut self.style
    }

    /// Check if the series is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> CurveStyle {
        CurveStyle {
            pen: LineStyle::default(),
            brush: Color::BLACK,
            marker: None,
        }
    }

    #[test]
    fn increment_ignores_out_of_range_bins() {
        let mut series = HistogramSeries::new("Data 0", 3, style());
        series.increment(1);
        series.increment(1);
        series.increment(7);
        assert_eq!(series.counts(), &[0.0, 2.0, 0.0]);
        assert_eq!(series.max_count(), 2.0);
        assert_eq!(series.total(), 2.0);
    }

    #[test]
    fn reset_bins_resizes_and_zeroes() {
        let mut series = HistogramSeries::new("Data 0", 3, style());
        series.increment(0);
        series.reset_bins(5);
        assert_eq!(series.counts(), &[0.0; 5]);
    }

    #[test]
    fn ids_are_unique() {
        let a = HistogramSeries::new("a", 1, style());
        let b = HistogramSeries::new("b", 1, style());
        assert_ne!(a.id(), b.id());
    }
}
