//! Error types for histogram operations.

use thiserror::Error;

/// Errors raised by histogram configuration changes.
///
/// An invalid range usually means the sample stream carried NaN or Inf
/// values, or every sample in an autoscale block was identical.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HistogramError {
    /// Left bound is not strictly below the right bound.
    #[error("invalid bin range: left {left} must be less than right {right}")]
    InvalidRange {
        /// Requested left bound.
        left: f64,
        /// Requested right bound.
        right: f64,
    },
    /// A histogram needs at least one bin.
    #[error("bin count must be at least 1")]
    ZeroBins,
}
