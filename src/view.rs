//! Data ranges and viewports.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let span = self.span();
        if span >= min_span {
            return *self;
        }
        let center = self.center();
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Visible data ranges on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Check whether both axes are valid.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_with_min_span_expands() {
        let range = Range::new(2.0, 2.0);
        let expanded = range.with_min_span(1.0);
        assert!(expanded.span() >= 1.0);
        assert!((expanded.center() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn range_new_orders_bounds() {
        let range = Range::new(3.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 3.0);
        assert!(range.contains(0.0));
        assert!(!range.contains(4.0));
    }
}
