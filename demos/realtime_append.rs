use std::time::{Duration, Instant};

use gpui_histogram::{HistogramConfig, HistogramPlot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = HistogramConfig {
        bins: 40,
        accumulate: true,
        ..HistogramConfig::default()
    };
    let mut plot = HistogramPlot::from_config(&config)?;
    plot.set_autoscale_x();

    let duration_secs: f64 = std::env::var("DURATION_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3.0);

    let block_len = 1024;
    let start = Instant::now();
    let mut next_report = Instant::now();
    let mut blocks = 0_usize;
    let mut block = vec![0.0; block_len];

    while start.elapsed().as_secs_f64() < duration_secs {
        for (index, value) in block.iter_mut().enumerate() {
            let t = (blocks * block_len + index) as f64;
            *value = (t * 0.013).sin() * 2.0 + (t * 0.0071).cos();
        }
        plot.plot_new_data(&[&block], block_len, 0.01)?;
        blocks += 1;

        if next_report.elapsed() >= Duration::from_secs(1) {
            let total = plot.series()[0].total();
            println!(
                "blocks: {blocks:>6}  samples binned: {total:>10}  peak bin: {:>8}",
                plot.max_count()
            );
            next_report = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(2));
    }

    let layout = plot.layout();
    println!(
        "bins span [{:.3}, {:.3}) in {} bins of {:.4}",
        layout.left(),
        layout.right(),
        layout.bins(),
        layout.width()
    );
    for (x, count) in layout.positions().iter().zip(plot.series()[0].counts()) {
        println!("{x:>8.3} {count:>8}");
    }
    Ok(())
}
