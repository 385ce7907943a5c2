//! Transform dimensions and frequency-domain storage layouts.

use rustfft::num_complex::Complex32;
use serde::Serialize;

use crate::buffer::try_vec;
use crate::error::BenchError;

/// Height and width of a 2D transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub height: usize,
    pub width: usize,
}

impl Dims {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub const fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Number of real samples in the input matrix.
    pub const fn len(&self) -> usize {
        self.height * self.width
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-redundant columns of a real-input spectrum row.
    pub const fn half_width(&self) -> usize {
        self.width / 2 + 1
    }

    pub(crate) fn ensure_nonzero(&self) -> Result<(), BenchError> {
        if self.is_empty() {
            return Err(BenchError::InvalidDims {
                height: self.height,
                width: self.width,
            });
        }
        Ok(())
    }
}

/// How a back-end stores the spectrum of a real input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpectrumLayout {
    /// Columns `0..=width/2` of each row.
    Half,
    /// All `width` columns of each row, including conjugate mirrors.
    Full,
}

impl SpectrumLayout {
    /// Distance in cells between the starts of consecutive rows.
    pub const fn row_stride(self, width: usize) -> usize {
        match self {
            SpectrumLayout::Half => width / 2 + 1,
            SpectrumLayout::Full => width,
        }
    }
}

/// Row-major complex output of a forward real-to-complex 2D transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    dims: Dims,
    layout: SpectrumLayout,
    data: Vec<Complex32>,
}

impl Spectrum {
    /// Allocate a zeroed spectrum for `dims` stored in `layout`.
    pub fn zeros(dims: Dims, layout: SpectrumLayout) -> Result<Self, BenchError> {
        dims.ensure_nonzero()?;
        let len = dims.height * layout.row_stride(dims.width);
        let data = try_vec("spectrum", len, Complex32::new(0.0, 0.0))?;
        Ok(Self { dims, layout, data })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn layout(&self) -> SpectrumLayout {
        self.layout
    }

    pub fn row_stride(&self) -> usize {
        self.layout.row_stride(self.dims.width)
    }

    /// Cell `(row, col)`, or `None` when it lies outside the stored region.
    pub fn get(&self, row: usize, col: usize) -> Option<Complex32> {
        self.index(row, col).map(|i| self.data[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Complex32> {
        let i = self.index(row, col)?;
        Some(&mut self.data[i])
    }

    pub fn as_slice(&self) -> &[Complex32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex32] {
        &mut self.data
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let stride = self.row_stride();
        (row < self.dims.height && col < stride).then(|| row * stride + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_follow_layout() {
        assert_eq!(SpectrumLayout::Half.row_stride(8), 5);
        assert_eq!(SpectrumLayout::Half.row_stride(7), 4);
        assert_eq!(SpectrumLayout::Full.row_stride(8), 8);
    }

    #[test]
    fn zeros_sizes_buffer_from_layout() {
        let dims = Dims::new(4, 6);
        let half = Spectrum::zeros(dims, SpectrumLayout::Half).unwrap();
        let full = Spectrum::zeros(dims, SpectrumLayout::Full).unwrap();
        assert_eq!(half.as_slice().len(), 4 * 4);
        assert_eq!(full.as_slice().len(), 4 * 6);
    }

    #[test]
    fn zero_dims_are_rejected() {
        let err = Spectrum::zeros(Dims::new(0, 4), SpectrumLayout::Full).unwrap_err();
        assert!(matches!(err, BenchError::InvalidDims { height: 0, width: 4 }));
    }

    #[test]
    fn cell_access_respects_stride() {
        let mut s = Spectrum::zeros(Dims::square(4), SpectrumLayout::Half).unwrap();
        *s.get_mut(2, 1).unwrap() = Complex32::new(1.0, -1.0);
        assert_eq!(s.as_slice()[2 * 3 + 1], Complex32::new(1.0, -1.0));
        assert_eq!(s.get(2, 1), Some(Complex32::new(1.0, -1.0)));
        assert!(s.get(2, 3).is_none());
        assert!(s.get(4, 0).is_none());
    }
}
