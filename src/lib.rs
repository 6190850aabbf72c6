//! gpui_histogram plots streaming sample blocks as fixed-width histograms.
//! The core model is backend-agnostic; the `gpui` feature adds an
//! interactive GPUI view with zoom, pan, a legend and a cursor tracker.

#![forbid(unsafe_code)]

pub mod axis;
pub mod bins;
pub mod config;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod plot;
pub mod render;
pub mod series;
pub mod style;
#[cfg(feature = "gpui")]
pub(crate) mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiHistogramView, HistogramHandle, PlotViewConfig};

pub use axis::{AxisConfig, AxisFormatter, AxisScale};
pub use bins::{BOUND_PADDING, BinLayout, DEFAULT_BINS};
pub use config::HistogramConfig;
pub use error::HistogramError;
pub use geom::Point;
pub use interaction::{ZoomStack, tracker_text};
pub use plot::{HistogramPlot, HistogramPlotBuilder, LOG_X_FLOOR, LOG_Y_FLOOR};
pub use render::{Color, LineStyle, MarkerShape, MarkerStyle};
pub use series::{CurveStyle, HistogramSeries, SeriesId};
pub use style::{SERIES_PALETTE, Theme};
pub use view::{Range, Viewport};
