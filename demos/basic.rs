use std::time::Duration;

use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use tracing_subscriber::EnvFilter;

use gpui_histogram::{Color, GpuiHistogramView, HistogramPlot, MarkerShape, Theme};

const BLOCK: usize = 2048;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(600.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let mut plot = HistogramPlot::builder()
                .theme(Theme::dark())
                .bins(80)
                .series(2)
                .x_range(-4.0, 4.0)
                .label(0, "I")
                .label(1, "Q")
                .build()
                .unwrap();
            plot.set_line_color(1, Color::from_rgb8(255, 150, 60));
            plot.set_line_marker(1, Some(MarkerShape::Cross));

            let view = GpuiHistogramView::new(plot);
            let plot_handle = view.plot_handle();
            let view_handle = cx.new(|_| view);

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        let mut rng = StdRng::seed_from_u64(0x5eed);
                        let mut phase = 0.0_f64;
                        loop {
                            Timer::after(Duration::from_millis(50)).await;
                            phase += 0.05;
                            let drift = phase.sin();
                            let i: Vec<f64> = (0..BLOCK)
                                .map(|_| drift + 0.8 * rng.sample::<f64, _>(StandardNormal))
                                .collect();
                            let q: Vec<f64> = (0..BLOCK)
                                .map(|_| -drift + 1.2 * rng.sample::<f64, _>(StandardNormal))
                                .collect();
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_view, view_cx| {
                                    plot_handle.write(|plot| {
                                        if let Err(err) = plot.plot_new_data(&[&i, &q], BLOCK, 0.05)
                                        {
                                            tracing::warn!(%err, "dropped block");
                                        }
                                    });
                                    view_cx.notify();
                                });
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .unwrap();
    });
}
