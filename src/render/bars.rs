use crate::axis::AxisScale;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{LineSegment, clip_segment};
use crate::transform::Transform;

/// Screen geometry for one histogram series.
#[derive(Debug, Clone, Default)]
pub(crate) struct BarGeometry {
    /// Filled bar per non-empty bin, clipped to the plot area.
    pub(crate) bars: Vec<ScreenRect>,
    /// Step outline along the bar tops.
    pub(crate) outline: Vec<LineSegment>,
    /// Bin centers at count height, for marker drawing. Empty bins sit on
    /// the baseline of a linear Y axis and have no marker on a log one.
    pub(crate) markers: Vec<ScreenPoint>,
}

/// Lay out bars for `counts`, bin `i` spanning `[positions[i], positions[i] + width)`.
///
/// The baseline is zero on a linear Y axis and the bottom of the viewport on a
/// log Y axis, where empty bins have no height.
pub(crate) fn build_bar_geometry(
    positions: &[f64],
    width: f64,
    counts: &[f64],
    transform: &Transform,
    clip: ScreenRect,
) -> BarGeometry {
    let mut geometry = BarGeometry::default();
    let linear_y = transform.y_scale() == AxisScale::Linear;
    let baseline = if linear_y {
        0.0
    } else {
        transform.viewport().y.min
    };
    let Some(base_y) = transform.y_to_screen(baseline) else {
        return geometry;
    };

    let mut previous: Option<(f32, f32)> = None;
    for (&position, &count) in positions.iter().zip(counts) {
        let (Some(x0), Some(x1)) = (
            transform.x_to_screen(position),
            transform.x_to_screen(position + width),
        ) else {
            close_run(&mut geometry.outline, previous.take(), base_y, clip);
            continue;
        };
        let top_y = if count > 0.0 {
            transform.y_to_screen(count).unwrap_or(base_y)
        } else {
            base_y
        };

        match previous {
            Some((prev_x, prev_top)) => {
                push_clipped(
                    &mut geometry.outline,
                    ScreenPoint::new(prev_x, prev_top),
                    ScreenPoint::new(x0, top_y),
                    clip,
                );
            }
            None => push_clipped(
                &mut geometry.outline,
                ScreenPoint::new(x0, base_y),
                ScreenPoint::new(x0, top_y),
                clip,
            ),
        }
        push_clipped(
            &mut geometry.outline,
            ScreenPoint::new(x0, top_y),
            ScreenPoint::new(x1, top_y),
            clip,
        );
        previous = Some((x1, top_y));

        let center = ScreenPoint::new((x0 + x1) * 0.5, top_y);
        if (count > 0.0 || linear_y) && clip.contains(center) {
            geometry.markers.push(center);
        }
        if count <= 0.0 || top_y == base_y {
            continue;
        }
        let bar = ScreenRect::from_corners(ScreenPoint::new(x0, top_y), ScreenPoint::new(x1, base_y));
        if let Some(bar) = bar.intersect(clip) {
            geometry.bars.push(bar);
        }
    }
    close_run(&mut geometry.outline, previous, base_y, clip);
    geometry
}

fn close_run(
    out: &mut Vec<LineSegment>,
    previous: Option<(f32, f32)>,
    base_y: f32,
    clip: ScreenRect,
) {
    if let Some((x, top)) = previous {
        push_clipped(
            out,
            ScreenPoint::new(x, top),
            ScreenPoint::new(x, base_y),
            clip,
        );
    }
}

fn push_clipped(
    out: &mut Vec<LineSegment>,
    start: ScreenPoint,
    end: ScreenPoint,
    clip: ScreenRect,
) {
    if start == end {
        return;
    }
    if let Some((start, end)) = clip_segment(start, end, clip) {
        out.push(LineSegment::new(start, end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Range, Viewport};

    fn transform(y_scale: AxisScale, y: Range) -> Transform {
        let viewport = Viewport::new(Range::new(0.0, 4.0), y);
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(400.0, 100.0));
        Transform::new(viewport, screen, AxisScale::Linear, y_scale).expect("valid transform")
    }

    #[test]
    fn empty_bins_get_baseline_markers_but_no_bars() {
        let transform = transform(AxisScale::Linear, Range::new(0.0, 10.0));
        let clip = transform.screen();
        let geometry =
            build_bar_geometry(&[0.0, 1.0, 2.0, 3.0], 1.0, &[5.0, 0.0, 10.0, 0.0], &transform, clip);
        assert_eq!(geometry.bars.len(), 2);
        assert_eq!(geometry.markers.len(), 4);
        let first = geometry.bars[0];
        assert!((first.min.x - 0.0).abs() < 1e-3);
        assert!((first.max.x - 100.0).abs() < 1e-3);
        assert!((first.min.y - 50.0).abs() < 1e-3);
        assert!((first.max.y - 100.0).abs() < 1e-3);
        assert!((geometry.markers[1].x - 150.0).abs() < 1e-3);
        assert!((geometry.markers[1].y - 100.0).abs() < 1e-3);
        assert!((geometry.markers[2].x - 250.0).abs() < 1e-3);
        assert!((geometry.markers[2].y - 0.0).abs() < 1e-3);
        assert!(!geometry.outline.is_empty());
    }

    #[test]
    fn log_axis_uses_viewport_floor_as_baseline() {
        let transform = transform(AxisScale::Log10, Range::new(1.0, 100.0));
        let clip = transform.screen();
        let geometry = build_bar_geometry(&[0.0, 1.0], 1.0, &[10.0, 0.0], &transform, clip);
        assert_eq!(geometry.bars.len(), 1);
        assert!((geometry.bars[0].max.y - 100.0).abs() < 1e-3);
        assert!((geometry.bars[0].min.y - 50.0).abs() < 1e-3);
        assert_eq!(geometry.markers.len(), 1);
        assert!((geometry.markers[0].x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn bars_are_clipped_to_plot_area() {
        let transform = transform(AxisScale::Linear, Range::new(0.0, 10.0));
        let clip = transform.screen();
        let geometry = build_bar_geometry(&[0.0], 1.0, &[50.0], &transform, clip);
        assert_eq!(geometry.bars.len(), 1);
        assert!((geometry.bars[0].min.y - 0.0).abs() < 1e-3);
        assert!(geometry.markers.is_empty());
    }
}
