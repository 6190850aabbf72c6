//! Serializable histogram settings.

use serde::{Deserialize, Serialize};

use crate::bins::DEFAULT_BINS;

/// Settings used to build a [`HistogramPlot`](crate::plot::HistogramPlot).
///
/// Missing fields fall back to [`HistogramConfig::default`] when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Number of bins.
    pub bins: usize,
    /// Number of input series.
    pub series: usize,
    /// Requested value range `[left, right]`, before padding.
    pub x_range: [f64; 2],
    /// Keep counts across updates.
    pub accumulate: bool,
    /// Rescale the count axis after every update.
    pub autoscale_y: bool,
    /// Logarithmic value axis.
    pub semilog_x: bool,
    /// Logarithmic count axis.
    pub semilog_y: bool,
    /// Value axis title.
    pub x_title: String,
    /// Count axis title.
    pub y_title: String,
    /// Per-series labels; missing entries use `"Data {i}"`.
    pub labels: Vec<String>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            series: 1,
            x_range: [-1.0, 1.0],
            accumulate: false,
            autoscale_y: true,
            semilog_x: false,
            semilog_y: false,
            x_title: "Value".to_string(),
            y_title: "Count".to_string(),
            labels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: HistogramConfig =
            serde_json::from_str(r#"{ "bins": 64, "accumulate": true }"#).expect("valid json");
        assert_eq!(config.bins, 64);
        assert!(config.accumulate);
        assert_eq!(config.series, 1);
        assert_eq!(config.x_range, [-1.0, 1.0]);
        assert_eq!(config.y_title, "Count");
    }

    #[test]
    fn json_roundtrip() {
        let config = HistogramConfig {
            series: 3,
            semilog_y: true,
            labels: vec!["I".into(), "Q".into()],
            ..HistogramConfig::default()
        };
        let text = serde_json::to_string(&config).expect("serializable");
        let back: HistogramConfig = serde_json::from_str(&text).expect("deserializable");
        assert_eq!(back, config);
    }
}
