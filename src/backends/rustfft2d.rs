//! Full-layout back-end: complex `rustfft` along both axes.

use std::sync::Arc;

use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

use crate::backend::{check_buffers, R2cBackend, R2cPlan};
use crate::buffer::{transpose, try_vec};
use crate::error::BenchError;
use crate::signal::Signal;
use crate::spectrum::{Dims, Spectrum, SpectrumLayout};

/// Back-end that promotes the input to complex and stores every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFft2d;

impl R2cBackend for RustFft2d {
    fn name(&self) -> &'static str {
        "rustfft"
    }

    fn layout(&self) -> SpectrumLayout {
        SpectrumLayout::Full
    }

    fn plan(&self, dims: Dims) -> Result<Box<dyn R2cPlan>, BenchError> {
        Ok(Box::new(RustFft2dPlan::new(dims)?))
    }
}

pub struct RustFft2dPlan {
    dims: Dims,
    row_fft: Arc<dyn Fft<f32>>,
    col_fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
    transposed: Vec<Complex32>,
}

impl RustFft2dPlan {
    pub fn new(dims: Dims) -> Result<Self, BenchError> {
        dims.ensure_nonzero()?;
        // One planner so square transforms share a single row/column plan.
        let mut planner = FftPlanner::<f32>::new();
        let row_fft = planner.plan_fft_forward(dims.width);
        let col_fft = planner.plan_fft_forward(dims.height);
        let scratch_len = row_fft
            .get_inplace_scratch_len()
            .max(col_fft.get_inplace_scratch_len());
        let zero = Complex32::new(0.0, 0.0);
        let plan = Self {
            dims,
            row_fft,
            col_fft,
            scratch: try_vec("rustfft scratch", scratch_len, zero)?,
            transposed: try_vec("transpose workspace", dims.len(), zero)?,
        };
        log::debug!(
            "planned rustfft {}x{} (scratch {})",
            dims.height,
            dims.width,
            scratch_len
        );
        Ok(plan)
    }
}

impl R2cPlan for RustFft2dPlan {
    fn dims(&self) -> Dims {
        self.dims
    }

    fn layout(&self) -> SpectrumLayout {
        SpectrumLayout::Full
    }

    fn execute(&mut self, input: &Signal, output: &mut Spectrum) -> Result<(), BenchError> {
        check_buffers(&*self, input, output)?;
        let Dims { height, width } = self.dims;
        let out = output.as_mut_slice();

        for (dst, &x) in out.iter_mut().zip(input.as_slice()) {
            *dst = Complex32::new(x, 0.0);
        }
        // rustfft transforms every `width`-long chunk of the buffer.
        self.row_fft.process_with_scratch(out, &mut self.scratch);

        transpose(out, &mut self.transposed, height, width);
        self.col_fft
            .process_with_scratch(&mut self.transposed, &mut self.scratch);
        transpose(&self.transposed, out, width, height);
        Ok(())
    }
}
