//! Rendering primitives and clipping helpers.
//!
//! Colors and styles are public. Render commands and clipping exist only
//! with the `gpui` feature, whose backend turns a `RenderList` into paint
//! calls.

#[cfg(feature = "gpui")]
mod bars;

#[cfg(feature = "gpui")]
pub(crate) use bars::build_bar_geometry;

#[cfg(feature = "gpui")]
use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color with components in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Alpha as an 8-bit value.
    pub fn alpha8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Same color with an 8-bit alpha.
    pub fn with_alpha8(self, alpha: u8) -> Self {
        Self {
            a: alpha as f32 / 255.0,
            ..self
        }
    }

    /// Same color with its alpha scaled by `factor`.
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling. Width is in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Marker shape drawn at bin centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Circle marker.
    Circle,
    /// Square marker.
    Square,
    /// Cross marker.
    Cross,
}

/// Marker styling. Size is in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 7.0,
            shape: MarkerShape::Circle,
        }
    }
}

#[cfg(feature = "gpui")]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RectStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

#[cfg(feature = "gpui")]
impl RectStyle {
    pub(crate) fn filled(fill: Color) -> Self {
        Self {
            fill,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        }
    }
}

#[cfg(feature = "gpui")]
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextStyle {
    pub color: Color,
    pub size: f32,
}

#[cfg(feature = "gpui")]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineSegment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

#[cfg(feature = "gpui")]
impl LineSegment {
    pub(crate) fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

#[cfg(feature = "gpui")]
/// A single drawing instruction in screen space.
#[derive(Debug, Clone)]
pub(crate) enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    LineSegments {
        segments: Vec<LineSegment>,
        style: LineStyle,
    },
    Points {
        points: Vec<ScreenPoint>,
        style: MarkerStyle,
    },
    /// Several rectangles sharing one style (histogram bars).
    Rects {
        rects: Vec<ScreenRect>,
        style: RectStyle,
    },
    Rect {
        rect: ScreenRect,
        style: RectStyle,
    },
    Text {
        position: ScreenPoint,
        text: String,
        style: TextStyle,
    },
}

#[cfg(feature = "gpui")]
#[derive(Debug, Default, Clone)]
pub(crate) struct RenderList {
    commands: Vec<RenderCommand>,
}

#[cfg(feature = "gpui")]
impl RenderList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub(crate) fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

#[cfg(feature = "gpui")]
/// Clip a segment to a rectangle (Cohen-Sutherland).
pub(crate) fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            (
                start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y),
                rect.min.y,
            )
        } else if (out_code & BOTTOM) != 0 {
            (
                start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y),
                rect.max.y,
            )
        } else if (out_code & RIGHT) != 0 {
            (
                rect.max.x,
                start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x),
            )
        } else {
            (
                rect.min.x,
                start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x),
            )
        };

        let clipped = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = clipped;
            out_start = region_code(start, rect);
        } else {
            end = clipped;
            out_end = region_code(end, rect);
        }
    }
}

#[cfg(feature = "gpui")]
const LEFT: u8 = 1;
#[cfg(feature = "gpui")]
const RIGHT: u8 = 2;
#[cfg(feature = "gpui")]
const TOP: u8 = 4;
#[cfg(feature = "gpui")]
const BOTTOM: u8 = 8;

#[cfg(feature = "gpui")]
fn region_code(point: ScreenPoint, rect: ScreenRect) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= LEFT;
    } else if point.x > rect.max.x {
        code |= RIGHT;
    }
    if point.y < rect.min.y {
        code |= TOP;
    } else if point.y > rect.max.y {
        code |= BOTTOM;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "gpui")]
    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0))
    }

    #[cfg(feature = "gpui")]
    #[test]
    fn clip_segment_inside() {
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect()).expect("segment should clip");
        assert_eq!(clipped, (start, end));
    }

    #[cfg(feature = "gpui")]
    #[test]
    fn clip_segment_crossing_edge() {
        let clipped = clip_segment(ScreenPoint::new(-5.0, 5.0), ScreenPoint::new(5.0, 5.0), rect())
            .expect("segment crosses the rect");
        assert_eq!(clipped.0, ScreenPoint::new(0.0, 5.0));
        assert!(clip_segment(ScreenPoint::new(-5.0, -5.0), ScreenPoint::new(-1.0, -1.0), rect()).is_none());
    }

    #[test]
    fn alpha8_roundtrip() {
        let color = Color::from_rgb8(0, 0, 255).with_alpha8(127);
        assert_eq!(color.alpha8(), 127);
        assert_eq!(color.with_alpha8(0).alpha8(), 0);
        assert_eq!(Color::from_rgb8(1, 2, 3).alpha8(), 255);
    }
}
