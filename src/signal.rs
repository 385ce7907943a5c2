//! Seeded random input matrix.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::buffer::try_vec;
use crate::error::BenchError;
use crate::spectrum::Dims;

/// Row-major real input shared read-only by every back-end.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    dims: Dims,
    data: Vec<f32>,
}

impl Signal {
    /// Fill `dims` with i.i.d. uniform samples in `[0, 1)` drawn from a
    /// generator seeded with `seed`. Identical seeds yield identical signals.
    pub fn random(dims: Dims, seed: u64) -> Result<Self, BenchError> {
        dims.ensure_nonzero()?;
        let mut data = try_vec("signal", dims.len(), 0.0f32)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Uniform::new(0.0f32, 1.0f32);
        for v in data.iter_mut() {
            *v = dist.sample(&mut rng);
        }
        log::debug!(
            "generated {}x{} signal from seed {seed}",
            dims.height,
            dims.width
        );
        Ok(Self { dims, data })
    }

    pub fn zeros(dims: Dims) -> Result<Self, BenchError> {
        dims.ensure_nonzero()?;
        Ok(Self {
            dims,
            data: try_vec("signal", dims.len(), 0.0f32)?,
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(dims: Dims, data: Vec<f32>) -> Result<Self, BenchError> {
        dims.ensure_nonzero()?;
        if data.len() != dims.len() {
            return Err(BenchError::DimensionMismatch {
                expected: dims.len(),
                found: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over the rows of the matrix.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.dims.width)
    }
}
