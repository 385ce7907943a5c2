//! Error type shared by every stage of the benchmark.

use core::fmt;

/// Failures that abort a benchmark run.
///
/// A numerical disagreement between back-ends is not an error; see
/// [`crate::compare::Comparison`].
#[derive(Debug)]
pub enum BenchError {
    /// A buffer or plan could not be allocated.
    Allocation { what: &'static str, len: usize },
    /// Transform dimensions must both be non-zero.
    InvalidDims { height: usize, width: usize },
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// Buffer or spectrum dimensions do not match the plan.
    DimensionMismatch { expected: usize, found: usize },
    /// Output spectrum layout does not match the plan.
    LayoutMismatch,
    /// The wrapped FFT library reported a failure.
    Backend(String),
    /// Writing the report failed.
    Io(std::io::Error),
}

impl BenchError {
    pub(crate) fn backend(err: impl fmt::Display) -> Self {
        BenchError::Backend(err.to_string())
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Allocation { what, len } => {
                write!(f, "failed to allocate {what} ({len} elements)")
            }
            BenchError::InvalidDims { height, width } => {
                write!(f, "invalid transform dimensions {height}x{width}")
            }
            BenchError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            BenchError::DimensionMismatch { expected, found } => {
                write!(f, "buffer length mismatch: expected {expected}, found {found}")
            }
            BenchError::LayoutMismatch => f.write_str("output spectrum layout does not match plan"),
            BenchError::Backend(msg) => write!(f, "fft backend error: {msg}"),
            BenchError::Io(err) => write!(f, "report output failed: {err}"),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err)
    }
}
