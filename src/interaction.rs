//! Zoom history, pan/zoom math and hit testing.
//!
//! These helpers keep interaction semantics independent of the render
//! backend.

use crate::geom::Point;
#[cfg(feature = "gpui")]
use crate::geom::{ScreenPoint, ScreenRect};
#[cfg(feature = "gpui")]
use crate::transform::Transform;
use crate::view::{Range, Viewport};

/// Zoom history. Level 0 is the base (fully zoomed-out) viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomStack {
    levels: Vec<Viewport>,
    index: usize,
}

impl ZoomStack {
    /// Create a stack whose base is `base`.
    pub fn new(base: Viewport) -> Self {
        Self {
            levels: vec![base],
            index: 0,
        }
    }

    /// The base viewport.
    pub fn base(&self) -> Viewport {
        self.levels[0]
    }

    /// The viewport at the current zoom level.
    pub fn current(&self) -> Viewport {
        self.levels[self.index]
    }

    /// Current zoom level (0 = fully zoomed out).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the view is fully zoomed out.
    pub fn is_at_base(&self) -> bool {
        self.index == 0
    }

    /// Replace the base, drop the history and return to it.
    pub fn set_base(&mut self, base: Viewport) {
        self.levels.clear();
        self.levels.push(base);
        self.index = 0;
    }

    /// Update the base Y range without touching the zoom history.
    pub fn set_base_y(&mut self, y: Range) {
        self.levels[0].y = y;
    }

    /// Push a new zoom level, discarding levels above the current one.
    pub fn zoom_in(&mut self, viewport: Viewport) {
        self.levels.truncate(self.index + 1);
        self.levels.push(viewport);
        self.index += 1;
    }

    /// Step back one level. Returns false when already at the base.
    pub fn zoom_out(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Return to the base level, keeping the history for redo.
    pub fn zoom_to_base(&mut self) {
        self.index = 0;
    }

    /// Replace the current level in place, or push one when at the base.
    ///
    /// Used by continuous gestures (pan, wheel zoom) so they do not grow
    /// the history on every event.
    pub fn replace_current(&mut self, viewport: Viewport) {
        if self.index == 0 {
            self.zoom_in(viewport);
        } else {
            self.levels.truncate(self.index + 1);
            self.levels[self.index] = viewport;
        }
    }
}

#[cfg(feature = "gpui")]
/// Interaction hit regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitRegion {
    Plot,
    XAxis,
    YAxis,
    Outside,
}

#[cfg(feature = "gpui")]
/// Screen regions for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotRegions {
    pub(crate) plot: ScreenRect,
    pub(crate) x_axis: ScreenRect,
    pub(crate) y_axis: ScreenRect,
}

#[cfg(feature = "gpui")]
impl PlotRegions {
    pub(crate) fn hit_test(&self, point: ScreenPoint) -> HitRegion {
        if self.plot.contains(point) {
            HitRegion::Plot
        } else if self.x_axis.contains(point) {
            HitRegion::XAxis
        } else if self.y_axis.contains(point) {
            HitRegion::YAxis
        } else {
            HitRegion::Outside
        }
    }
}

#[cfg(feature = "gpui")]
/// Pan a viewport by a pixel delta.
pub(crate) fn pan_viewport(
    viewport: Viewport,
    delta_pixels: ScreenPoint,
    transform: &Transform,
) -> Option<Viewport> {
    if delta_pixels.x == 0.0 && delta_pixels.y == 0.0 {
        return Some(viewport);
    }
    let screen = transform.screen();
    let shifted = transform.screen_to_data(ScreenPoint::new(
        screen.min.x - delta_pixels.x,
        screen.min.y - delta_pixels.y,
    ))?;
    let corner = transform.screen_to_data(ScreenPoint::new(
        screen.max.x - delta_pixels.x,
        screen.max.y - delta_pixels.y,
    ))?;
    Some(Viewport::new(
        Range::new(corner.x.min(shifted.x), corner.x.max(shifted.x)),
        Range::new(corner.y.min(shifted.y), corner.y.max(shifted.y)),
    ))
}

#[cfg(feature = "gpui")]
/// Zoom a viewport around a center point. Factors below 1 zoom in.
pub(crate) fn zoom_viewport(
    viewport: Viewport,
    center: Point,
    factor_x: f64,
    factor_y: f64,
) -> Viewport {
    let x_min = center.x + (viewport.x.min - center.x) * factor_x;
    let x_max = center.x + (viewport.x.max - center.x) * factor_x;
    let y_min = center.y + (viewport.y.min - center.y) * factor_y;
    let y_max = center.y + (viewport.y.max - center.y) * factor_y;
    Viewport::new(Range::new(x_min, x_max), Range::new(y_min, y_max))
}

#[cfg(feature = "gpui")]
/// Convert a rubber band rectangle into a viewport.
///
/// Returns `None` for bands too small to be intentional.
pub(crate) fn zoom_to_rect(rect: ScreenRect, transform: &Transform) -> Option<Viewport> {
    if rect.width().abs() < 2.0 || rect.height().abs() < 2.0 {
        return None;
    }
    let top_left = transform.screen_to_data(rect.min)?;
    let bottom_right = transform.screen_to_data(rect.max)?;
    Some(Viewport::new(
        Range::new(top_left.x, bottom_right.x),
        Range::new(top_left.y, bottom_right.y),
    ))
}

/// Tracker readout for a cursor position in data space.
///
/// Counts between 1e-4 and 1e4 print as integers, anything else in
/// exponent form.
pub fn tracker_text(point: Point) -> String {
    if point.y > 0.0001 && point.y < 10000.0 {
        format!("{:.4}, {:.0}", point.x, point.y)
    } else {
        format!("{:.4}, {:.0e}", point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "gpui")]
    use crate::axis::AxisScale;

    fn viewport(x0: f64, x1: f64, y0: f64, y1: f64) -> Viewport {
        Viewport::new(Range::new(x0, x1), Range::new(y0, y1))
    }

    #[test]
    fn zoom_stack_history() {
        let mut stack = ZoomStack::new(viewport(0.0, 10.0, 0.0, 10.0));
        assert!(stack.is_at_base());
        assert!(!stack.zoom_out());

        stack.zoom_in(viewport(2.0, 8.0, 0.0, 5.0));
        stack.zoom_in(viewport(3.0, 4.0, 1.0, 2.0));
        assert_eq!(stack.index(), 2);
        assert!(stack.zoom_out());
        assert_eq!(stack.current(), viewport(2.0, 8.0, 0.0, 5.0));

        stack.zoom_in(viewport(5.0, 6.0, 0.0, 1.0));
        assert_eq!(stack.index(), 2);
        assert_eq!(stack.current(), viewport(5.0, 6.0, 0.0, 1.0));

        stack.zoom_to_base();
        assert_eq!(stack.current(), stack.base());
    }

    #[test]
    fn replace_current_does_not_grow_history() {
        let mut stack = ZoomStack::new(viewport(0.0, 10.0, 0.0, 10.0));
        stack.replace_current(viewport(1.0, 9.0, 0.0, 10.0));
        stack.replace_current(viewport(2.0, 8.0, 0.0, 10.0));
        assert_eq!(stack.index(), 1);
        assert_eq!(stack.current(), viewport(2.0, 8.0, 0.0, 10.0));
    }

    #[test]
    fn set_base_resets_history() {
        let mut stack = ZoomStack::new(viewport(0.0, 10.0, 0.0, 10.0));
        stack.zoom_in(viewport(2.0, 8.0, 0.0, 5.0));
        stack.set_base(viewport(-5.0, 5.0, 0.0, 10.0));
        assert!(stack.is_at_base());
        assert_eq!(stack.current(), viewport(-5.0, 5.0, 0.0, 10.0));
        stack.set_base_y(Range::new(0.0, 42.0));
        assert_eq!(stack.current().y, Range::new(0.0, 42.0));
    }

    #[cfg(feature = "gpui")]
    #[test]
    fn zoom_to_rect_maps_corners() {
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        let transform = Transform::new(
            viewport(0.0, 10.0, 0.0, 10.0),
            screen,
            AxisScale::Linear,
            AxisScale::Linear,
        )
        .expect("valid transform");
        let band = ScreenRect::new(ScreenPoint::new(20.0, 20.0), ScreenPoint::new(60.0, 80.0));
        let zoomed = zoom_to_rect(band, &transform).expect("band is large enough");
        assert!((zoomed.x.min - 2.0).abs() < 1e-5);
        assert!((zoomed.x.max - 6.0).abs() < 1e-5);
        assert!((zoomed.y.min - 2.0).abs() < 1e-5);
        assert!((zoomed.y.max - 8.0).abs() < 1e-5);

        let tiny = ScreenRect::new(ScreenPoint::new(20.0, 20.0), ScreenPoint::new(21.0, 80.0));
        assert!(zoom_to_rect(tiny, &transform).is_none());
    }

    #[cfg(feature = "gpui")]
    #[test]
    fn pan_shifts_by_pixel_delta() {
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        let base = viewport(0.0, 10.0, 0.0, 10.0);
        let transform =
            Transform::new(base, screen, AxisScale::Linear, AxisScale::Linear).expect("valid");
        let panned = pan_viewport(base, ScreenPoint::new(10.0, 0.0), &transform).unwrap();
        assert!((panned.x.min - -1.0).abs() < 1e-5);
        assert!((panned.x.max - 9.0).abs() < 1e-5);
        assert!((panned.y.min - 0.0).abs() < 1e-5);
    }

    #[cfg(feature = "gpui")]
    #[test]
    fn zoom_viewport_around_center() {
        let zoomed = zoom_viewport(viewport(0.0, 10.0, 0.0, 10.0), Point::new(5.0, 5.0), 0.5, 1.0);
        assert_eq!(zoomed.x, Range::new(2.5, 7.5));
        assert_eq!(zoomed.y, Range::new(0.0, 10.0));
    }

    #[test]
    fn tracker_switches_to_exponent() {
        assert_eq!(tracker_text(Point::new(0.5, 12.0)), "0.5000, 12");
        assert_eq!(tracker_text(Point::new(-1.25, 30000.0)), "-1.2500, 3e4");
        assert_eq!(tracker_text(Point::new(0.0, 0.0)), "0.0000, 0e0");
    }
}
