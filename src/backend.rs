//! Capability interface every FFT back-end implements.
//!
//! A back-end builds a plan once for fixed dimensions; the plan then executes
//! the forward real-to-complex 2D transform any number of times into a
//! caller-owned [`Spectrum`]. Plans own all of their working memory so that
//! `execute` neither allocates nor re-plans.

use crate::error::BenchError;
use crate::signal::Signal;
use crate::spectrum::{Dims, Spectrum, SpectrumLayout};

/// Factory for transform plans of one FFT library.
pub trait R2cBackend {
    /// Short library name used in reports.
    fn name(&self) -> &'static str;

    /// Layout of the spectra produced by this back-end's plans.
    fn layout(&self) -> SpectrumLayout;

    /// Precompute everything needed to transform a `dims` input.
    fn plan(&self, dims: Dims) -> Result<Box<dyn R2cPlan>, BenchError>;
}

/// A precomputed forward transform bound to fixed dimensions.
pub trait R2cPlan {
    fn dims(&self) -> Dims;

    fn layout(&self) -> SpectrumLayout;

    /// Allocate an output buffer matching this plan.
    fn make_output(&self) -> Result<Spectrum, BenchError> {
        Spectrum::zeros(self.dims(), self.layout())
    }

    /// Transform `input` into `output`. The input is never modified and the
    /// result depends only on the plan and the input.
    fn execute(&mut self, input: &Signal, output: &mut Spectrum) -> Result<(), BenchError>;
}

/// Reject buffers that were not sized for `plan`.
pub(crate) fn check_buffers(
    plan: &dyn R2cPlan,
    input: &Signal,
    output: &Spectrum,
) -> Result<(), BenchError> {
    let dims = plan.dims();
    if input.dims() != dims {
        return Err(BenchError::DimensionMismatch {
            expected: dims.len(),
            found: input.dims().len(),
        });
    }
    if output.layout() != plan.layout() {
        return Err(BenchError::LayoutMismatch);
    }
    if output.dims() != dims {
        return Err(BenchError::DimensionMismatch {
            expected: dims.height * output.row_stride(),
            found: output.as_slice().len(),
        });
    }
    Ok(())
}
