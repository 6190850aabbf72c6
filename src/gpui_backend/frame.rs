use gpui::{Bounds, Pixels, Window};
use tracing::trace;

use crate::axis::{AxisConfig, AxisLayout, TextMeasurer};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{PlotRegions, tracker_text};
use crate::plot::HistogramPlot;
use crate::render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
    build_bar_geometry,
};
use crate::transform::Transform;

use super::config::PlotViewConfig;
use super::constants::*;
use super::geometry::{clamp_point, rect_intersects};
use super::state::{LegendEntry, LegendLayout, PlotUiState};
use super::text::GpuiTextMeasurer;

#[derive(Debug, Clone)]
pub(crate) struct PlotFrame {
    pub(crate) render: RenderList,
}

pub(crate) fn build_frame(
    plot: &HistogramPlot,
    state: &mut PlotUiState,
    config: &PlotViewConfig,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> PlotFrame {
    let mut render = RenderList::new();

    let full_width = f32::from(bounds.size.width);
    let full_height = f32::from(bounds.size.height);
    if full_width <= 1.0 || full_height <= 1.0 {
        return PlotFrame { render };
    }

    let viewport = plot.viewport();
    trace!(
        generation = plot.generation(),
        width = full_width,
        height = full_height,
        "building histogram frame"
    );
    let measurer = GpuiTextMeasurer::new(window);

    let x_layout = state
        .x_layout
        .update(plot.x_axis(), viewport.x, full_width as u32, &measurer)
        .clone();
    let y_layout = state
        .y_layout
        .update(plot.y_axis(), viewport.y, full_height as u32, &measurer)
        .clone();

    let x_title_size = plot
        .x_axis()
        .display_title()
        .map(|title| measurer.measure(&title, plot.x_axis().label_size()))
        .unwrap_or((0.0, 0.0));
    let y_title_size = plot
        .y_axis()
        .display_title()
        .map(|title| measurer.measure(&title, plot.y_axis().label_size()))
        .unwrap_or((0.0, 0.0));

    let x_axis_height =
        x_layout.max_label_size.1 + TICK_LENGTH_MAJOR + AXIS_PADDING * 2.0 + x_title_size.1;
    let y_axis_width = (y_layout.max_label_size.0 + TICK_LENGTH_MAJOR + AXIS_PADDING * 2.0)
        .max(y_title_size.0 + AXIS_PADDING * 2.0);

    let x_axis_height = x_axis_height.clamp(0.0, full_height - 1.0);
    let y_axis_width = y_axis_width.clamp(0.0, full_width - 1.0);

    let plot_width = (full_width - y_axis_width).max(1.0);
    let plot_height = (full_height - x_axis_height).max(1.0);

    let x_layout = state
        .x_layout
        .update(plot.x_axis(), viewport.x, plot_width as u32, &measurer)
        .clone();
    let y_layout = state
        .y_layout
        .update(plot.y_axis(), viewport.y, plot_height as u32, &measurer)
        .clone();

    let origin_x = f32::from(bounds.origin.x);
    let origin_y = f32::from(bounds.origin.y);
    let full_max_x = origin_x + full_width;
    let full_max_y = origin_y + full_height;

    let plot_rect = ScreenRect::new(
        ScreenPoint::new(origin_x + y_axis_width, origin_y),
        ScreenPoint::new(full_max_x, full_max_y - x_axis_height),
    );
    let x_axis_rect = ScreenRect::new(
        ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
        ScreenPoint::new(plot_rect.max.x, full_max_y),
    );
    let y_axis_rect = ScreenRect::new(
        ScreenPoint::new(origin_x, plot_rect.min.y),
        ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
    );

    state.regions = PlotRegions {
        plot: plot_rect,
        x_axis: x_axis_rect,
        y_axis: y_axis_rect,
    };

    let transform = Transform::new(
        viewport,
        plot_rect,
        plot.x_axis().scale(),
        plot.y_axis().scale(),
    );
    state.transform = transform.clone();

    let Some(transform) = transform else {
        state.legend_layout = None;
        build_invalid_range(&mut render, plot, plot_rect, &measurer);
        return PlotFrame { render };
    };

    build_grid(
        &mut render,
        plot,
        &x_layout,
        &y_layout,
        &transform,
        plot_rect,
    );
    build_bars(&mut render, plot, &transform, plot_rect);
    build_selection(&mut render, plot, state);
    let axes = AxisRects {
        plot: plot_rect,
        x: x_axis_rect,
        y: y_axis_rect,
    };
    build_axes(
        &mut render,
        plot,
        &x_layout,
        &y_layout,
        &transform,
        axes,
        &measurer,
    );
    build_axis_titles(&mut render, plot, axes, &measurer);
    if config.show_legend {
        build_legend(&mut render, plot, state, plot_rect, &measurer);
    } else {
        state.legend_layout = None;
    }
    if config.show_tracker {
        build_tracker(&mut render, plot, state, &transform, plot_rect, &measurer);
    }

    PlotFrame { render }
}

#[derive(Debug, Clone, Copy)]
struct AxisRects {
    plot: ScreenRect,
    x: ScreenRect,
    y: ScreenRect,
}

fn build_invalid_range(
    render: &mut RenderList,
    plot: &HistogramPlot,
    plot_rect: ScreenRect,
    measurer: &GpuiTextMeasurer<'_>,
) {
    let message = "Invalid axis range";
    let size = measurer.measure(message, 14.0);
    let pos = ScreenPoint::new(
        plot_rect.min.x + (plot_rect.width() - size.0) * 0.5,
        plot_rect.min.y + (plot_rect.height() - size.1) * 0.5,
    );
    render.push(RenderCommand::Text {
        position: pos,
        text: message.to_string(),
        style: TextStyle {
            color: plot.theme().axis,
            size: 14.0,
        },
    });
}

fn build_grid(
    render: &mut RenderList,
    plot: &HistogramPlot,
    x_layout: &AxisLayout,
    y_layout: &AxisLayout,
    transform: &Transform,
    plot_rect: ScreenRect,
) {
    let theme = plot.theme();
    let mut major = Vec::new();
    let mut minor = Vec::new();

    if plot.x_axis().show_grid() {
        for tick in &x_layout.ticks {
            let Some(x) = transform.x_to_screen(tick.value) else {
                continue;
            };
            let segment = LineSegment::new(
                ScreenPoint::new(x, plot_rect.min.y),
                ScreenPoint::new(x, plot_rect.max.y),
            );
            if tick.is_major {
                major.push(segment);
            } else {
                minor.push(segment);
            }
        }
    }

    if plot.y_axis().show_grid() {
        for tick in &y_layout.ticks {
            let Some(y) = transform.y_to_screen(tick.value) else {
                continue;
            };
            let segment = LineSegment::new(
                ScreenPoint::new(plot_rect.min.x, y),
                ScreenPoint::new(plot_rect.max.x, y),
            );
            if tick.is_major {
                major.push(segment);
            } else {
                minor.push(segment);
            }
        }
    }

    render.push(RenderCommand::ClipRect(plot_rect));
    if !minor.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: minor,
            style: LineStyle {
                color: theme.grid_minor,
                width: 1.0,
            },
        });
    }
    if !major.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: major,
            style: LineStyle {
                color: theme.grid_major,
                width: 1.0,
            },
        });
    }
    render.push(RenderCommand::ClipEnd);
}

fn build_bars(
    render: &mut RenderList,
    plot: &HistogramPlot,
    transform: &Transform,
    plot_rect: ScreenRect,
) {
    let positions = plot.bin_positions();
    let width = plot.layout().width();

    render.push(RenderCommand::ClipRect(plot_rect));
    for series in plot.series() {
        if !series.is_visible() {
            continue;
        }
        let style = series.style();
        let geometry = build_bar_geometry(positions, width, series.counts(), transform, plot_rect);
        if !geometry.bars.is_empty() && style.brush.a > 0.0 {
            render.push(RenderCommand::Rects {
                rects: geometry.bars,
                style: RectStyle::filled(style.brush),
            });
        }
        if !geometry.outline.is_empty() && style.pen.color.a > 0.0 {
            render.push(RenderCommand::LineSegments {
                segments: geometry.outline,
                style: style.pen,
            });
        }
        if let Some(marker) = style.marker {
            if !geometry.markers.is_empty() {
                render.push(RenderCommand::Points {
                    points: geometry.markers,
                    style: marker,
                });
            }
        }
    }
    render.push(RenderCommand::ClipEnd);
}

fn build_selection(render: &mut RenderList, plot: &HistogramPlot, state: &PlotUiState) {
    if let Some(rect) = state.selection_rect {
        render.push(RenderCommand::Rect {
            rect: ScreenRect::from_corners(rect.min, rect.max),
            style: RectStyle {
                fill: plot.theme().selection_fill,
                stroke: plot.theme().selection_border,
                stroke_width: 1.0,
            },
        });
    }
}

fn build_axes(
    render: &mut RenderList,
    plot: &HistogramPlot,
    x_layout: &AxisLayout,
    y_layout: &AxisLayout,
    transform: &Transform,
    rects: AxisRects,
    measurer: &GpuiTextMeasurer<'_>,
) {
    let theme = plot.theme();
    let plot_rect = rects.plot;
    let mut ticks = Vec::new();
    let label_gap = 2.0_f32;
    let mut last_x_label_right = f32::NEG_INFINITY;
    let mut last_y_label_top = f32::INFINITY;
    let x_title_rect = x_title_rect(plot.x_axis(), rects, measurer);

    render.push(RenderCommand::Rect {
        rect: plot_rect,
        style: RectStyle {
            fill: Color::TRANSPARENT,
            stroke: theme.axis,
            stroke_width: 1.0,
        },
    });

    for tick in &x_layout.ticks {
        let Some(x) = transform.x_to_screen(tick.value) else {
            continue;
        };
        let length = if tick.is_major {
            TICK_LENGTH_MAJOR
        } else {
            TICK_LENGTH_MINOR
        };
        ticks.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.max.y),
            ScreenPoint::new(x, plot_rect.max.y + length),
        ));

        if tick.is_major && !tick.label.is_empty() {
            let size = measurer.measure(&tick.label, plot.x_axis().label_size());
            let pos = clamp_point(
                ScreenPoint::new(
                    x - size.0 * 0.5,
                    plot_rect.max.y + TICK_LENGTH_MAJOR + AXIS_PADDING,
                ),
                rects.x,
                size,
            );
            let label_rect = ScreenRect::new(pos, ScreenPoint::new(pos.x + size.0, pos.y + size.1));
            let overlaps_title = x_title_rect.is_some_and(|rect| rect_intersects(label_rect, rect));
            if !overlaps_title && pos.x >= last_x_label_right + label_gap {
                render.push(RenderCommand::Text {
                    position: pos,
                    text: tick.label.clone(),
                    style: TextStyle {
                        color: theme.axis,
                        size: plot.x_axis().label_size(),
                    },
                });
                last_x_label_right = label_rect.max.x;
            }
        }
    }

    for tick in &y_layout.ticks {
        let Some(y) = transform.y_to_screen(tick.value) else {
            continue;
        };
        let length = if tick.is_major {
            TICK_LENGTH_MAJOR
        } else {
            TICK_LENGTH_MINOR
        };
        ticks.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x - length, y),
            ScreenPoint::new(plot_rect.min.x, y),
        ));

        if tick.is_major && !tick.label.is_empty() {
            let size = measurer.measure(&tick.label, plot.y_axis().label_size());
            let pos = clamp_point(
                ScreenPoint::new(
                    plot_rect.min.x - TICK_LENGTH_MAJOR - AXIS_PADDING - size.0,
                    y - size.1 * 0.5,
                ),
                rects.y,
                size,
            );
            let label_bottom = pos.y + size.1;
            if label_bottom <= last_y_label_top - label_gap {
                render.push(RenderCommand::Text {
                    position: pos,
                    text: tick.label.clone(),
                    style: TextStyle {
                        color: theme.axis,
                        size: plot.y_axis().label_size(),
                    },
                });
                last_y_label_top = pos.y;
            }
        }
    }

    if !ticks.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: ticks,
            style: LineStyle {
                color: theme.axis,
                width: 1.0,
            },
        });
    }
}

fn x_title_rect(
    axis: &AxisConfig,
    rects: AxisRects,
    measurer: &GpuiTextMeasurer<'_>,
) -> Option<ScreenRect> {
    let title = axis.display_title()?;
    let size = measurer.measure(&title, axis.label_size());
    let pos = clamp_point(
        ScreenPoint::new(
            rects.plot.min.x + (rects.plot.width() - size.0) * 0.5,
            rects.x.max.y - size.1 - AXIS_PADDING,
        ),
        rects.x,
        size,
    );
    Some(ScreenRect::new(
        pos,
        ScreenPoint::new(pos.x + size.0, pos.y + size.1),
    ))
}

fn build_axis_titles(
    render: &mut RenderList,
    plot: &HistogramPlot,
    rects: AxisRects,
    measurer: &GpuiTextMeasurer<'_>,
) {
    let theme = plot.theme();
    if let (Some(title), Some(rect)) = (
        plot.x_axis().display_title(),
        x_title_rect(plot.x_axis(), rects, measurer),
    ) {
        render.push(RenderCommand::Text {
            position: rect.min,
            text: title,
            style: TextStyle {
                color: theme.axis,
                size: plot.x_axis().label_size(),
            },
        });
    }

    if let Some(title) = plot.y_axis().display_title() {
        let size = measurer.measure(&title, plot.y_axis().label_size());
        let pos = clamp_point(
            ScreenPoint::new(rects.y.min.x + AXIS_PADDING, rects.y.min.y + AXIS_PADDING),
            rects.y,
            size,
        );
        render.push(RenderCommand::Text {
            position: pos,
            text: title,
            style: TextStyle {
                color: theme.axis,
                size: plot.y_axis().label_size(),
            },
        });
    }
}

fn build_tracker(
    render: &mut RenderList,
    plot: &HistogramPlot,
    state: &PlotUiState,
    transform: &Transform,
    plot_rect: ScreenRect,
    measurer: &GpuiTextMeasurer<'_>,
) {
    let Some(cursor) = state.hover else { return };
    if !plot_rect.contains(cursor) || state.drag.as_ref().is_some_and(|drag| drag.active) {
        return;
    }
    let Some(data) = transform.screen_to_data(cursor) else {
        return;
    };
    let theme = plot.theme();
    let label = tracker_text(data);
    let text_size = measurer.measure(&label, TRACKER_FONT_SIZE);
    let size = (text_size.0 + 8.0, text_size.1 + 4.0);

    let mut origin = ScreenPoint::new(cursor.x + TRACKER_OFFSET, cursor.y + TRACKER_OFFSET);
    if origin.x + size.0 > plot_rect.max.x {
        origin.x = cursor.x - size.0 - TRACKER_OFFSET;
    }
    if origin.y + size.1 > plot_rect.max.y {
        origin.y = cursor.y - size.1 - TRACKER_OFFSET;
    }
    let origin = clamp_point(origin, plot_rect, size);

    render.push(RenderCommand::Rect {
        rect: ScreenRect::new(
            origin,
            ScreenPoint::new(origin.x + size.0, origin.y + size.1),
        ),
        style: RectStyle {
            fill: theme.tracker_bg,
            stroke: theme.selection_border,
            stroke_width: 1.0,
        },
    });
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(origin.x + 4.0, origin.y + 2.0),
        text: label,
        style: TextStyle {
            color: theme.selection_border,
            size: TRACKER_FONT_SIZE,
        },
    });
}

fn build_legend(
    render: &mut RenderList,
    plot: &HistogramPlot,
    state: &mut PlotUiState,
    plot_rect: ScreenRect,
    measurer: &GpuiTextMeasurer<'_>,
) {
    let theme = plot.theme();
    let series_list = plot.series();
    if series_list.is_empty() {
        state.legend_layout = None;
        return;
    }

    let padding = LEGEND_PADDING;
    let line_height = LEGEND_LINE_HEIGHT;
    let text_start_x = padding + LEGEND_SWATCH_WIDTH + LEGEND_SWATCH_GAP;
    let max_width = series_list
        .iter()
        .map(|series| measurer.measure(series.name(), LEGEND_FONT_SIZE).0)
        .fold(0.0_f32, f32::max);
    let legend_width = text_start_x + max_width + padding;
    let legend_height = series_list.len() as f32 * line_height + padding * 2.0;

    let origin = clamp_point(
        ScreenPoint::new(
            plot_rect.max.x - legend_width - padding,
            plot_rect.min.y + padding,
        ),
        plot_rect,
        (legend_width, legend_height),
    );
    let legend_rect = ScreenRect::new(
        origin,
        ScreenPoint::new(origin.x + legend_width, origin.y + legend_height),
    );

    render.push(RenderCommand::Rect {
        rect: legend_rect,
        style: RectStyle {
            fill: theme.legend_bg,
            stroke: theme.legend_border,
            stroke_width: 1.0,
        },
    });

    let mut entries = Vec::with_capacity(series_list.len());
    for (idx, series) in series_list.iter().enumerate() {
        let row_y = origin.y + padding + idx as f32 * line_height;
        let row_rect = ScreenRect::new(
            ScreenPoint::new(origin.x, row_y),
            ScreenPoint::new(origin.x + legend_width, row_y + line_height),
        );
        entries.push(LegendEntry {
            series_id: series.id(),
            row_rect,
        });

        let fade = if series.is_visible() {
            1.0
        } else {
            LEGEND_HIDDEN_ALPHA
        };
        let style = series.style();
        let swatch_min = ScreenPoint::new(
            origin.x + padding,
            row_y + (line_height - LEGEND_SWATCH_HEIGHT) * 0.5,
        );
        render.push(RenderCommand::Rect {
            rect: ScreenRect::new(
                swatch_min,
                ScreenPoint::new(
                    swatch_min.x + LEGEND_SWATCH_WIDTH,
                    swatch_min.y + LEGEND_SWATCH_HEIGHT,
                ),
            ),
            style: RectStyle {
                fill: style.brush.faded(fade),
                stroke: style.pen.color.with_alpha8(255).faded(fade),
                stroke_width: 1.0,
            },
        });
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                origin.x + text_start_x,
                row_y + (line_height - LEGEND_FONT_SIZE) * 0.5,
            ),
            text: series.name().to_string(),
            style: TextStyle {
                color: theme.axis.faded(fade),
                size: LEGEND_FONT_SIZE,
            },
        });
    }

    state.legend_layout = Some(LegendLayout {
        rect: legend_rect,
        entries,
    });
}
