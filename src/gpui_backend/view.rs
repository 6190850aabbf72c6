use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::prelude::*;
use gpui::{
    Modifiers, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point,
    ScrollWheelEvent, Window, canvas, div, px,
};
use tracing::trace;

use crate::geom::{Point as DataPoint, ScreenPoint, ScreenRect};
use crate::interaction::{HitRegion, pan_viewport, zoom_to_rect, zoom_viewport};
use crate::plot::HistogramPlot;
use crate::view::Viewport;

use super::config::PlotViewConfig;
use super::constants::WHEEL_LINE_HEIGHT;
use super::frame::build_frame;
use super::geometry::distance_sq;
use super::paint::{paint_frame, to_hsla};
use super::state::{ClickState, DragMode, DragState, PlotUiState};

/// A GPUI view that renders a [`HistogramPlot`] with interactive controls.
///
/// Mouse bindings:
/// - left drag: rubber band zoom, pushed onto the zoom history
/// - right click: step back one zoom level
/// - ctrl/cmd + right click or double left click: return to the base view
/// - middle drag: pan
/// - wheel: zoom around the cursor (axis gutters zoom one axis)
/// - legend click: show or hide a series
#[derive(Clone)]
pub struct GpuiHistogramView {
    plot: Arc<RwLock<HistogramPlot>>,
    state: Arc<RwLock<PlotUiState>>,
    config: PlotViewConfig,
}

impl GpuiHistogramView {
    /// Create a new view for the given plot.
    ///
    /// Uses the default [`PlotViewConfig`].
    pub fn new(plot: HistogramPlot) -> Self {
        Self::with_config(plot, PlotViewConfig::default())
    }

    /// Create a new view with a custom configuration.
    pub fn with_config(plot: HistogramPlot, config: PlotViewConfig) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            state: Arc::new(RwLock::new(PlotUiState::default())),
            config,
        }
    }

    /// Get a handle for feeding and configuring the underlying plot.
    ///
    /// This is useful for streaming updates from async tasks.
    pub fn plot_handle(&self) -> HistogramHandle {
        HistogramHandle {
            plot: Arc::clone(&self.plot),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = write_lock(&self.state);

        if let Some(series_id) = state.legend_hit(pos) {
            if ev.button == MouseButton::Left && ev.click_count == 1 {
                write_lock(&self.plot).toggle_series(series_id);
            }
            state.clear_interaction();
            cx.notify();
            return;
        }

        let region = state.regions.hit_test(pos);
        if region != HitRegion::Plot {
            return;
        }

        let to_base = match ev.button {
            MouseButton::Left => ev.click_count >= 2,
            MouseButton::Right => is_reset_modifier(&ev.modifiers),
            _ => false,
        };
        if to_base {
            trace!("zoom to base");
            write_lock(&self.plot).zoom_to_base();
            state.clear_interaction();
            cx.notify();
            return;
        }

        state.pending_click = Some(ClickState {
            region,
            button: ev.button,
        });
        match ev.button {
            MouseButton::Left => {
                state.drag = Some(DragState::new(DragMode::ZoomRect, pos));
            }
            MouseButton::Middle => {
                state.drag = Some(DragState::new(DragMode::Pan, pos));
            }
            _ => {}
        }
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = write_lock(&self.state);

        state.hover = (state.legend_hit(pos).is_none()
            && state.regions.hit_test(pos) == HitRegion::Plot)
            .then_some(pos);

        let Some(mut drag) = state.drag.clone() else {
            cx.notify();
            return;
        };

        if !drag.active && distance_sq(drag.start, pos) > self.config.drag_threshold_px.powi(2) {
            drag.active = true;
            state.pending_click = None;
        }
        if !drag.active {
            state.drag = Some(drag);
            return;
        }

        match drag.mode {
            DragMode::Pan => {
                let delta = ScreenPoint::new(pos.x - drag.last.x, pos.y - drag.last.y);
                if let Some(transform) = state.transform.clone() {
                    let mut plot = write_lock(&self.plot);
                    if let Some(next) = pan_viewport(plot.viewport(), delta, &transform) {
                        apply_view(&mut plot, next);
                    }
                }
            }
            DragMode::ZoomRect => {
                let plot_rect = state.regions.plot;
                let end = ScreenPoint::new(
                    pos.x.clamp(plot_rect.min.x, plot_rect.max.x),
                    pos.y.clamp(plot_rect.min.y, plot_rect.max.y),
                );
                state.selection_rect = Some(ScreenRect::from_corners(drag.start, end));
            }
        }

        drag.last = pos;
        state.drag = Some(drag);
        cx.notify();
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let mut state = write_lock(&self.state);
        let drag = state.drag.take();
        let selection = state.selection_rect.take();
        let click = state.pending_click.take();

        if let Some(drag) = drag.filter(|drag| drag.active && drag.mode == DragMode::ZoomRect) {
            let rect = selection.unwrap_or_else(|| ScreenRect::from_corners(drag.start, drag.last));
            if let Some(next) = state
                .transform
                .as_ref()
                .and_then(|transform| zoom_to_rect(rect, transform))
            {
                let mut plot = write_lock(&self.plot);
                if is_view_valid(&plot, next) {
                    trace!(x_min = next.x.min, x_max = next.x.max, "rubber band zoom");
                    plot.zoom_in(next);
                }
            }
        }

        let zoom_out = click.is_some_and(|click| {
            click.button == MouseButton::Right && click.region == HitRegion::Plot
        }) && ev.button == MouseButton::Right;
        if zoom_out {
            write_lock(&self.plot).zoom_out();
        }

        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let state = read_lock(&self.state);
        if state.legend_hit(pos).is_some() {
            return;
        }
        let region = state.regions.hit_test(pos);
        let Some(transform) = state.transform.clone() else {
            return;
        };

        let delta = ev.delta.pixel_delta(px(WHEEL_LINE_HEIGHT));
        let zoom_delta = -f32::from(delta.y);
        if zoom_delta.abs() < 0.01 {
            return;
        }
        let factor = (1.0 - zoom_delta as f64 * self.config.wheel_zoom_speed).clamp(0.1, 10.0);
        let (factor_x, factor_y) = match region {
            HitRegion::XAxis => (factor, 1.0),
            HitRegion::YAxis => (1.0, factor),
            HitRegion::Plot => (factor, factor),
            HitRegion::Outside => return,
        };

        let mut plot = write_lock(&self.plot);
        let viewport = plot.viewport();
        let center = transform.screen_to_data(pos).unwrap_or_else(|| {
            DataPoint::new(viewport.x.center(), viewport.y.center())
        });
        apply_view(
            &mut plot,
            zoom_viewport(viewport, center, factor_x, factor_y),
        );
        cx.notify();
    }
}

impl Render for GpuiHistogramView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let background = read_lock(&self.plot).theme().background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let plot = read_lock(&plot);
                        let mut state = write_lock(&state);
                        build_frame(&plot, &mut state, &config, bounds, window)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_down(
                MouseButton::Middle,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up(
                MouseButton::Right,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up(
                MouseButton::Middle,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

/// A handle for mutating a [`HistogramPlot`] held inside a
/// [`GpuiHistogramView`].
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct HistogramHandle {
    plot: Arc<RwLock<HistogramPlot>>,
}

impl HistogramHandle {
    /// Read the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&HistogramPlot) -> R) -> R {
        f(&read_lock(&self.plot))
    }

    /// Mutate the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut HistogramPlot) -> R) -> R {
        f(&mut write_lock(&self.plot))
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn is_reset_modifier(modifiers: &Modifiers) -> bool {
    modifiers.control || modifiers.platform
}

fn is_view_valid(plot: &HistogramPlot, viewport: Viewport) -> bool {
    viewport.is_valid()
        && plot.x_axis().scale().is_range_valid(viewport.x)
        && plot.y_axis().scale().is_range_valid(viewport.y)
}

fn apply_view(plot: &mut HistogramPlot, viewport: Viewport) {
    if is_view_valid(plot, viewport) {
        plot.set_view(viewport);
    }
}

#[cfg(test)]
mod tests {
    use crate::{GpuiHistogramView, HistogramHandle, HistogramPlot, PlotViewConfig};

    #[test]
    fn handle_feeds_the_shared_plot() {
        let plot = HistogramPlot::builder()
            .bins(10)
            .series(1)
            .x_range(-1.0, 1.0)
            .build()
            .expect("valid plot");
        let config = PlotViewConfig {
            show_tracker: false,
            ..PlotViewConfig::default()
        };
        let view = GpuiHistogramView::with_config(plot, config);
        let handle: HistogramHandle = view.plot_handle();

        handle
            .write(|plot| plot.plot_new_data(&[[0.0, 0.5, 0.5]], 3, 0.0))
            .expect("samples binned");
        let total = view
            .plot_handle()
            .read(|plot| plot.counts(0).map(|counts| counts.iter().sum::<f64>()));
        assert_eq!(total, Some(3.0));
    }
}
