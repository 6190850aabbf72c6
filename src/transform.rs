//! Coordinate transforms between data and screen space.

use crate::axis::AxisScale;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::{Range, Viewport};

const MIN_SPAN: f64 = 1e-12;

/// Maps data coordinates onto a screen rectangle, honoring axis scales.
#[derive(Debug, Clone)]
pub(crate) struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
    x_scale: AxisScale,
    y_scale: AxisScale,
    x_axis: Range,
    y_axis: Range,
}

impl Transform {
    /// Returns `None` when the screen is empty or the viewport cannot be
    /// represented on the requested scales (e.g. non-positive log bounds).
    pub(crate) fn new(
        viewport: Viewport,
        screen: ScreenRect,
        x_scale: AxisScale,
        y_scale: AxisScale,
    ) -> Option<Self> {
        if !screen.is_valid() {
            return None;
        }
        let x_axis = map_range(viewport.x, x_scale)?.with_min_span(MIN_SPAN);
        let y_axis = map_range(viewport.y, y_scale)?.with_min_span(MIN_SPAN);
        Some(Self {
            viewport,
            screen,
            x_scale,
            y_scale,
            x_axis,
            y_axis,
        })
    }

    pub(crate) fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub(crate) fn screen(&self) -> ScreenRect {
        self.screen
    }

    pub(crate) fn x_scale(&self) -> AxisScale {
        self.x_scale
    }

    pub(crate) fn y_scale(&self) -> AxisScale {
        self.y_scale
    }

    /// Screen X for a data X value.
    pub(crate) fn x_to_screen(&self, x: f64) -> Option<f32> {
        let x = self.x_scale.map_value(x)?;
        let norm = (x - self.x_axis.min) / self.x_axis.span();
        Some((self.screen.min.x as f64 + norm * self.screen.width() as f64) as f32)
    }

    /// Screen Y for a data Y value.
    pub(crate) fn y_to_screen(&self, y: f64) -> Option<f32> {
        let y = self.y_scale.map_value(y)?;
        let norm = (y - self.y_axis.min) / self.y_axis.span();
        Some((self.screen.max.y as f64 - norm * self.screen.height() as f64) as f32)
    }

    pub(crate) fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        Some(ScreenPoint::new(
            self.x_to_screen(point.x)?,
            self.y_to_screen(point.y)?,
        ))
    }

    pub(crate) fn screen_to_data(&self, point: ScreenPoint) -> Option<Point> {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        let x = self
            .x_scale
            .invert_value(self.x_axis.min + x_norm * self.x_axis.span())?;
        let y = self
            .y_scale
            .invert_value(self.y_axis.min + y_norm * self.y_axis.span())?;
        Some(Point::new(x, y))
    }
}

fn map_range(range: Range, scale: AxisScale) -> Option<Range> {
    let min = scale.map_value(range.min)?;
    let max = scale.map_value(range.max)?;
    Some(Range::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0))
    }

    #[test]
    fn linear_roundtrip() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let transform = Transform::new(viewport, screen(), AxisScale::Linear, AxisScale::Linear)
            .expect("valid transform");
        let point = Point::new(5.0, 7.5);
        let screen_point = transform.data_to_screen(point).unwrap();
        let roundtrip = transform.screen_to_data(screen_point).unwrap();
        assert!((roundtrip.x - point.x).abs() < 1e-5);
        assert!((roundtrip.y - point.y).abs() < 1e-5);
    }

    #[test]
    fn log_y_places_decades_evenly() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(1.0, 100.0));
        let transform = Transform::new(viewport, screen(), AxisScale::Linear, AxisScale::Log10)
            .expect("valid transform");
        assert!((transform.y_to_screen(1.0).unwrap() - 100.0).abs() < 1e-3);
        assert!((transform.y_to_screen(10.0).unwrap() - 50.0).abs() < 1e-3);
        assert!(transform.y_to_screen(0.0).is_none());
    }

    #[test]
    fn log_rejects_non_positive_range() {
        let viewport = Viewport::new(Range::new(-1.0, 10.0), Range::new(1.0, 10.0));
        let transform = Transform::new(viewport, screen(), AxisScale::Log10, AxisScale::Linear);
        assert!(transform.is_none());
    }
}
