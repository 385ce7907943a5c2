//! Benchmark parameters.

use serde::Serialize;

use crate::error::BenchError;
use crate::spectrum::Dims;

/// Edge length of the square input matrix.
pub const DEFAULT_SIZE: usize = 2048;

/// Number of back-to-back executions in the averaged phase.
pub const DEFAULT_RUNS: usize = 1000;

/// Seed for the input generator.
pub const DEFAULT_SEED: u64 = 114514;

/// Largest accepted per-cell difference `|dre| + |dim|` between back-ends.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Parameters of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchConfig {
    pub size: usize,
    pub runs: usize,
    pub seed: u64,
    pub tolerance: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            runs: DEFAULT_RUNS,
            seed: DEFAULT_SEED,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl BenchConfig {
    /// Check that every value is usable by the harness.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.size == 0 {
            return Err(BenchError::InvalidConfig("size must be at least 1".into()));
        }
        if self.runs == 0 {
            return Err(BenchError::InvalidConfig("runs must be at least 1".into()));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(BenchError::InvalidConfig(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Square transform dimensions.
    pub fn dims(&self) -> Dims {
        Dims::square(self.size)
    }
}
