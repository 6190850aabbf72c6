//! GPUI integration for gpui_histogram.
//!
//! This module provides a GPUI view that renders a
//! [`HistogramPlot`](crate::plot::HistogramPlot) and handles rubber band zoom,
//! zoom history, panning, wheel zoom, legend toggles and the cursor tracker.

#![allow(clippy::collapsible_if)]

mod config;
mod constants;
mod frame;
mod geometry;
mod paint;
mod state;
mod text;
mod view;

pub use config::PlotViewConfig;
pub use view::{GpuiHistogramView, HistogramHandle};
