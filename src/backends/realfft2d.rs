//! Half-spectrum back-end: `realfft` along rows, `rustfft` along columns.

use std::sync::Arc;

use realfft::{RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

use crate::backend::{check_buffers, R2cBackend, R2cPlan};
use crate::buffer::{transpose, try_vec};
use crate::error::BenchError;
use crate::signal::Signal;
use crate::spectrum::{Dims, Spectrum, SpectrumLayout};

/// Back-end producing the non-redundant `width/2 + 1` columns per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFft2d;

impl R2cBackend for RealFft2d {
    fn name(&self) -> &'static str {
        "realfft"
    }

    fn layout(&self) -> SpectrumLayout {
        SpectrumLayout::Half
    }

    fn plan(&self, dims: Dims) -> Result<Box<dyn R2cPlan>, BenchError> {
        Ok(Box::new(RealFft2dPlan::new(dims)?))
    }
}

/// Row and column transforms plus every buffer `execute` needs.
pub struct RealFft2dPlan {
    dims: Dims,
    row_fft: Arc<dyn RealToComplex<f32>>,
    col_fft: Arc<dyn Fft<f32>>,
    // realfft uses its input as scratch, so rows are copied here first.
    row_in: Vec<f32>,
    row_scratch: Vec<Complex32>,
    col_scratch: Vec<Complex32>,
    transposed: Vec<Complex32>,
}

impl RealFft2dPlan {
    pub fn new(dims: Dims) -> Result<Self, BenchError> {
        dims.ensure_nonzero()?;
        let row_fft = RealFftPlanner::<f32>::new().plan_fft_forward(dims.width);
        let col_fft = FftPlanner::<f32>::new().plan_fft_forward(dims.height);
        let zero = Complex32::new(0.0, 0.0);
        let plan = Self {
            dims,
            row_in: try_vec("realfft row input", dims.width, 0.0f32)?,
            row_scratch: try_vec("realfft row scratch", row_fft.get_scratch_len(), zero)?,
            col_scratch: try_vec(
                "rustfft column scratch",
                col_fft.get_inplace_scratch_len(),
                zero,
            )?,
            transposed: try_vec("transpose workspace", dims.height * dims.half_width(), zero)?,
            row_fft,
            col_fft,
        };
        log::debug!(
            "planned realfft {}x{} (row scratch {}, column scratch {})",
            dims.height,
            dims.width,
            plan.row_scratch.len(),
            plan.col_scratch.len()
        );
        Ok(plan)
    }
}

impl R2cPlan for RealFft2dPlan {
    fn dims(&self) -> Dims {
        self.dims
    }

    fn layout(&self) -> SpectrumLayout {
        SpectrumLayout::Half
    }

    fn execute(&mut self, input: &Signal, output: &mut Spectrum) -> Result<(), BenchError> {
        check_buffers(&*self, input, output)?;
        let height = self.dims.height;
        let stride = self.dims.half_width();

        for (row, out_row) in input.rows().zip(output.as_mut_slice().chunks_exact_mut(stride)) {
            self.row_in.copy_from_slice(row);
            self.row_fft
                .process_with_scratch(&mut self.row_in, out_row, &mut self.row_scratch)
                .map_err(BenchError::backend)?;
        }

        // Columns become contiguous rows so one call transforms all of them.
        transpose(output.as_slice(), &mut self.transposed, height, stride);
        self.col_fft
            .process_with_scratch(&mut self.transposed, &mut self.col_scratch);
        transpose(&self.transposed, output.as_mut_slice(), stride, height);
        Ok(())
    }
}
