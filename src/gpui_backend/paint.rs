use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, Window, point, px,
    quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand,
};

use super::frame::PlotFrame;
use super::text::shape_line;

pub(crate) fn paint_frame(frame: &PlotFrame, window: &mut Window, cx: &mut App) {
    let mut clip: Option<ContentMask<Pixels>> = None;
    for command in frame.render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip = Some(ContentMask {
                    bounds: to_bounds(*rect),
                });
            }
            RenderCommand::ClipEnd => clip = None,
            RenderCommand::LineSegments { segments, style } => {
                window.with_content_mask(clip.clone(), |window| {
                    paint_lines(window, segments, *style);
                });
            }
            RenderCommand::Points { points, style } => {
                window.with_content_mask(clip.clone(), |window| {
                    paint_markers(window, points, *style);
                });
            }
            RenderCommand::Rects { rects, style } => {
                window.with_content_mask(clip.clone(), |window| {
                    for rect in rects {
                        paint_rect(window, *rect, *style);
                    }
                });
            }
            RenderCommand::Rect { rect, style } => {
                window.with_content_mask(clip.clone(), |window| {
                    paint_rect(window, *rect, *style);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                if text.is_empty() {
                    continue;
                }
                window.with_content_mask(clip.clone(), |window| {
                    let shaped = shape_line(window, text, style.size, to_hsla(style.color));
                    let line_height = shaped.ascent + shaped.descent;
                    let origin = point(px(position.x), px(position.y));
                    let _ = shaped.paint(origin, line_height, window, cx);
                });
            }
        }
    }
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    for segment in segments {
        builder.move_to(point(px(segment.start.x), px(segment.start.y)));
        builder.line_to(point(px(segment.end.x), px(segment.end.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_markers(window: &mut Window, points: &[ScreenPoint], style: MarkerStyle) {
    let half = style.size.max(2.0) * 0.5;
    let corner = match style.shape {
        MarkerShape::Circle => half,
        MarkerShape::Square => 0.0,
        MarkerShape::Cross => {
            let mut builder = PathBuilder::stroke(px(1.0));
            for pt in points {
                builder.move_to(point(px(pt.x - half), px(pt.y)));
                builder.line_to(point(px(pt.x + half), px(pt.y)));
                builder.move_to(point(px(pt.x), px(pt.y - half)));
                builder.line_to(point(px(pt.x), px(pt.y + half)));
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, to_rgba(style.color));
            }
            return;
        }
    };
    for pt in points {
        let bounds = Bounds::from_corners(
            point(px(pt.x - half), px(pt.y - half)),
            point(px(pt.x + half), px(pt.y + half)),
        );
        window.paint_quad(quad(
            bounds,
            Corners::all(px(corner)),
            to_rgba(style.color),
            Edges::all(px(0.0)),
            to_rgba(style.color),
            BorderStyle::default(),
        ));
    }
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    ));
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}
