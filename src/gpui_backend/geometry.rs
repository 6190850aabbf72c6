use crate::geom::{ScreenPoint, ScreenRect};

pub(crate) fn distance_sq(a: ScreenPoint, b: ScreenPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Keep a box of `size` anchored at `point` inside `rect`.
pub(crate) fn clamp_point(point: ScreenPoint, rect: ScreenRect, size: (f32, f32)) -> ScreenPoint {
    let max_x = (rect.max.x - size.0).max(rect.min.x);
    let max_y = (rect.max.y - size.1).max(rect.min.y);
    ScreenPoint::new(
        point.x.clamp(rect.min.x, max_x),
        point.y.clamp(rect.min.y, max_y),
    )
}

pub(crate) fn rect_intersects(a: ScreenRect, b: ScreenRect) -> bool {
    !(a.max.x <= b.min.x || a.min.x >= b.max.x || a.max.y <= b.min.y || a.min.y >= b.max.y)
}
