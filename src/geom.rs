//! Geometric primitives shared by the model and render backends.
//!
//! [`Point`] lives in data space. Screen-space types are internal to the
//! GPUI backend.

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Value-axis coordinate.
    pub x: f64,
    /// Count-axis coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(feature = "gpui")]
/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScreenPoint {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

#[cfg(feature = "gpui")]
impl ScreenPoint {
    pub(crate) fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(feature = "gpui")]
/// A rectangle in screen space, `min` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScreenRect {
    pub(crate) min: ScreenPoint,
    pub(crate) max: ScreenPoint,
}

#[cfg(feature = "gpui")]
impl ScreenRect {
    pub(crate) fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Build a rectangle from two arbitrary corners.
    pub(crate) fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub(crate) fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub(crate) fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub(crate) fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    pub(crate) fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Intersection with another rectangle, if any area remains.
    pub(crate) fn intersect(&self, other: ScreenRect) -> Option<ScreenRect> {
        let rect = ScreenRect::new(
            ScreenPoint::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            ScreenPoint::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        );
        rect.is_valid().then_some(rect)
    }
}

#[cfg(all(test, feature = "gpui"))]
mod tests {
    use super::*;

    #[test]
    fn from_corners_normalizes() {
        let rect = ScreenRect::from_corners(ScreenPoint::new(10.0, 2.0), ScreenPoint::new(4.0, 8.0));
        assert_eq!(rect.min, ScreenPoint::new(4.0, 2.0));
        assert_eq!(rect.max, ScreenPoint::new(10.0, 8.0));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(5.0, 5.0));
        let b = ScreenRect::new(ScreenPoint::new(6.0, 6.0), ScreenPoint::new(9.0, 9.0));
        assert!(a.intersect(b).is_none());
        let c = ScreenRect::new(ScreenPoint::new(2.0, 3.0), ScreenPoint::new(9.0, 9.0));
        let clipped = a.intersect(c).expect("overlap");
        assert_eq!(clipped.min, ScreenPoint::new(2.0, 3.0));
        assert_eq!(clipped.max, ScreenPoint::new(5.0, 5.0));
    }
}
