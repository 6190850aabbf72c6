//! Fixed-width bin layout.
//!
//! A [`BinLayout`] turns a requested value range into padded bin bounds, a
//! uniform bin width and one x coordinate per bin. All series in a plot share
//! the same layout.

use crate::error::HistogramError;
use crate::view::Range;

/// Fraction of each bound's magnitude added on the side away from zero.
pub const BOUND_PADDING: f64 = 0.1;

/// Bin count used when none is configured.
pub const DEFAULT_BINS: usize = 100;

/// Padded bin bounds and per-bin coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BinLayout {
    requested: Range,
    left: f64,
    right: f64,
    width: f64,
    positions: Vec<f64>,
}

impl BinLayout {
    /// Build a layout with `bins` bins over the padded `[left, right]` range.
    pub fn new(bins: usize, left: f64, right: f64) -> Result<Self, HistogramError> {
        if bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        validate(left, right)?;
        let mut layout = Self {
            requested: Range { min: left, max: right },
            left,
            right,
            width: 0.0,
            positions: vec![0.0; bins],
        };
        layout.apply_padding();
        Ok(layout)
    }

    /// Recompute bounds, width and positions for a new requested range.
    ///
    /// Equal, inverted or NaN bounds are rejected and leave the layout
    /// untouched.
    pub fn rebuild(&mut self, left: f64, right: f64) -> Result<(), HistogramError> {
        validate(left, right)?;
        self.requested = Range { min: left, max: right };
        self.apply_padding();
        Ok(())
    }

    fn apply_padding(&mut self) {
        let Range { min: left, max: right } = self.requested;
        self.left = left * (1.0 - BOUND_PADDING.copysign(left));
        self.right = right * (1.0 + BOUND_PADDING.copysign(right));
        self.width = (self.right - self.left) / self.positions.len() as f64;
        for (index, position) in self.positions.iter_mut().enumerate() {
            *position = self.left + index as f64 * self.width;
        }
    }

    /// Change the bin count and rebuild from the current padded bounds.
    ///
    /// The padded bounds become the requested range, so every resize widens
    /// the layout by another [`BOUND_PADDING`].
    pub fn resize(&mut self, bins: usize) -> Result<(), HistogramError> {
        if bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        self.requested = Range {
            min: self.left,
            max: self.right,
        };
        self.positions.resize(bins, 0.0);
        self.apply_padding();
        Ok(())
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.positions.len()
    }

    /// Padded left bound.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Padded right bound.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Bin width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The range the current bounds were padded from.
    pub fn requested(&self) -> Range {
        self.requested
    }

    /// X coordinate of each bin (`left + i * width`).
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Bin index for a sample, or `None` when it falls outside the layout.
    ///
    /// The index is the rounded offset from the left bound in bin widths, so
    /// values up to half a bin below `left` still land in bin 0 and values
    /// within half a bin of `right` are dropped.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        let offset = (1e-20 + (value - self.left) / self.width).round();
        if !offset.is_finite() || offset < 0.0 {
            return None;
        }
        let index = offset as usize;
        (index < self.bins()).then_some(index)
    }
}

impl Default for BinLayout {
    /// [`DEFAULT_BINS`] bins over the requested range `[-1, 1]`.
    fn default() -> Self {
        let mut layout = Self {
            requested: Range { min: -1.0, max: 1.0 },
            left: -1.0,
            right: 1.0,
            width: 0.0,
            positions: vec![0.0; DEFAULT_BINS],
        };
        layout.apply_padding();
        layout
    }
}

fn validate(left: f64, right: f64) -> Result<(), HistogramError> {
    if left.is_nan() || right.is_nan() || left >= right {
        return Err(HistogramError::InvalidRange { left, right });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_away_from_zero() {
        let layout = BinLayout::new(10, -2.0, 4.0).unwrap();
        assert!((layout.left() - -2.2).abs() < 1e-12);
        assert!((layout.right() - 4.4).abs() < 1e-12);

        let positive = BinLayout::new(10, 2.0, 4.0).unwrap();
        assert!((positive.left() - 1.8).abs() < 1e-12);

        let negative = BinLayout::new(10, -4.0, -2.0).unwrap();
        assert!((negative.left() - -4.4).abs() < 1e-12);
        assert!((negative.right() - -1.8).abs() < 1e-12);
    }

    #[test]
    fn rejects_equal_inverted_and_nan_bounds() {
        let mut layout = BinLayout::new(4, 0.0, 1.0).unwrap();
        let before = layout.clone();
        assert_eq!(
            layout.rebuild(1.0, 1.0),
            Err(HistogramError::InvalidRange { left: 1.0, right: 1.0 })
        );
        assert!(layout.rebuild(2.0, 1.0).is_err());
        assert!(layout.rebuild(f64::NAN, 1.0).is_err());
        assert_eq!(layout, before);
    }

    #[test]
    fn positions_are_uniform_and_below_right() {
        for (left, right) in [(-1.0, 1.0), (0.0, 5.0), (3.0, 7.5), (-9.0, -0.5)] {
            let layout = BinLayout::new(25, left, right).unwrap();
            let positions = layout.positions();
            assert_eq!(positions.len(), 25);
            assert_eq!(positions[0], layout.left());
            for pair in positions.windows(2) {
                assert!(pair[1] > pair[0]);
                assert!((pair[1] - pair[0] - layout.width()).abs() < 1e-9);
            }
            let last = *positions.last().unwrap();
            assert!(last < layout.right());
            assert!((layout.right() - last - layout.width()).abs() < 1e-9);
        }
    }

    #[test]
    fn index_is_half_open() {
        let layout = BinLayout::new(10, -1.0, 1.0).unwrap();
        assert_eq!(layout.index_of(layout.left()), Some(0));
        assert_eq!(layout.index_of(layout.right()), None);
        assert_eq!(layout.index_of(layout.left() - 0.4 * layout.width()), Some(0));
        assert_eq!(layout.index_of(layout.left() - layout.width()), None);
        assert_eq!(layout.index_of(f64::NAN), None);
        assert_eq!(layout.index_of(f64::INFINITY), None);
        assert_eq!(layout.index_of(layout.positions()[4]), Some(4));
    }

    #[test]
    fn default_layout_spans_padded_unit_range() {
        let layout = BinLayout::default();
        assert_eq!(layout.bins(), DEFAULT_BINS);
        assert!((layout.left() - -1.1).abs() < 1e-12);
        assert!((layout.right() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn resize_repads_current_bounds() {
        let mut layout = BinLayout::new(10, -1.0, 1.0).unwrap();
        layout.resize(40).unwrap();
        assert_eq!(layout.bins(), 40);
        assert!((layout.left() - -1.21).abs() < 1e-12);
        assert!((layout.right() - 1.21).abs() < 1e-12);
        assert!((layout.width() - 2.42 / 40.0).abs() < 1e-12);
        assert!((layout.requested().min - -1.1).abs() < 1e-12);
        assert!((layout.requested().max - 1.1).abs() < 1e-12);

        let mut positive = BinLayout::new(10, 2.0, 4.0).unwrap();
        positive.resize(10).unwrap();
        assert!((positive.left() - 1.62).abs() < 1e-12);
        assert!((positive.right() - 4.84).abs() < 1e-12);

        let before = layout.clone();
        assert_eq!(layout.resize(0), Err(HistogramError::ZeroBins));
        assert_eq!(layout, before);
    }
}
