//! Element-wise agreement check between two spectra of the same input.
//!
//! Only the non-redundant region (columns `0..=width/2` of every row) is
//! read; each spectrum is addressed through its own [`SpectrumLayout`], so a
//! half-spectrum can be checked against a full one.
//!
//! [`SpectrumLayout`]: crate::spectrum::SpectrumLayout

use serde::Serialize;

use crate::error::BenchError;
use crate::spectrum::{Dims, Spectrum};

/// Combined difference `|dre| + |dim|` at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellDiff {
    pub diff: f32,
    pub row: usize,
    pub col: usize,
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Comparison {
    Match,
    /// First cell, in row-major order, whose difference exceeds the tolerance.
    Mismatch(CellDiff),
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match)
    }
}

/// Compare the non-redundant regions of `a` and `b`, stopping at the first
/// cell whose combined difference is strictly greater than `tolerance`.
pub fn compare(
    a: &Spectrum,
    b: &Spectrum,
    dims: Dims,
    tolerance: f64,
) -> Result<Comparison, BenchError> {
    let found = cells(a, b, dims)?.find(|d| f64::from(d.diff) > tolerance);
    Ok(match found {
        Some(d) => Comparison::Mismatch(d),
        None => Comparison::Match,
    })
}

/// Largest combined difference over the non-redundant region.
///
/// Ties keep the earliest cell. NaN differences are reported over any finite one.
pub fn max_abs_diff(a: &Spectrum, b: &Spectrum, dims: Dims) -> Result<CellDiff, BenchError> {
    let mut peak = CellDiff {
        diff: 0.0,
        row: 0,
        col: 0,
    };
    for d in cells(a, b, dims)? {
        if d.diff > peak.diff || (d.diff.is_nan() && !peak.diff.is_nan()) {
            peak = d;
        }
    }
    Ok(peak)
}

fn cells<'a>(
    a: &'a Spectrum,
    b: &'a Spectrum,
    dims: Dims,
) -> Result<impl Iterator<Item = CellDiff> + 'a, BenchError> {
    for s in [a, b] {
        if s.dims() != dims {
            return Err(BenchError::DimensionMismatch {
                expected: dims.len(),
                found: s.dims().len(),
            });
        }
    }
    let (sa, sb) = (a.row_stride(), b.row_stride());
    let (xa, xb) = (a.as_slice(), b.as_slice());
    let half = dims.half_width();
    Ok((0..dims.height).flat_map(move |row| {
        (0..half).map(move |col| {
            let p = xa[row * sa + col];
            let q = xb[row * sb + col];
            CellDiff {
                diff: (p.re - q.re).abs() + (p.im - q.im).abs(),
                row,
                col,
            }
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::SpectrumLayout;
    use proptest::prelude::*;
    use rustfft::num_complex::Complex32;

    fn pair(dims: Dims) -> (Spectrum, Spectrum) {
        (
            Spectrum::zeros(dims, SpectrumLayout::Half).unwrap(),
            Spectrum::zeros(dims, SpectrumLayout::Full).unwrap(),
        )
    }

    #[test]
    fn identical_spectra_match() {
        let dims = Dims::square(4);
        let (a, b) = pair(dims);
        assert_eq!(compare(&a, &b, dims, 1e-6).unwrap(), Comparison::Match);
    }

    #[test]
    fn tolerance_boundary() {
        let dims = Dims::square(4);
        let (mut a, b) = pair(dims);
        for v in a.as_mut_slice() {
            *v = Complex32::new(0.999e-6, 0.0);
        }
        assert!(compare(&a, &b, dims, 1e-6).unwrap().is_match());

        *a.get_mut(1, 1).unwrap() = Complex32::new(1.001e-6, 0.0);
        match compare(&a, &b, dims, 1e-6).unwrap() {
            Comparison::Mismatch(d) => assert_eq!((d.row, d.col), (1, 1)),
            Comparison::Match => panic!("difference above tolerance accepted"),
        }
    }

    #[test]
    fn real_and_imaginary_errors_add_up() {
        let dims = Dims::square(2);
        let (mut a, b) = pair(dims);
        // Each part alone is inside the budget, the sum is not.
        *a.get_mut(0, 1).unwrap() = Complex32::new(0.6e-6, -0.6e-6);
        assert_eq!(
            compare(&a, &b, dims, 1e-6).unwrap(),
            Comparison::Mismatch(CellDiff {
                diff: 0.6e-6f32 + 0.6e-6f32,
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn reports_first_violation_in_row_major_order() {
        let dims = Dims::square(8);
        let (a, mut b) = pair(dims);
        b.get_mut(5, 0).unwrap().re = 2.0;
        b.get_mut(2, 3).unwrap().im = 1.0;
        b.get_mut(2, 4).unwrap().re = 9.0;
        match compare(&a, &b, dims, 1e-6).unwrap() {
            Comparison::Mismatch(d) => {
                assert_eq!((d.row, d.col), (2, 3));
                assert_eq!(d.diff, 1.0);
            }
            Comparison::Match => panic!("expected mismatch"),
        }
    }

    #[test]
    fn redundant_columns_are_never_read() {
        let dims = Dims::square(8);
        let (a, mut b) = pair(dims);
        for row in 0..8 {
            for col in 5..8 {
                *b.get_mut(row, col).unwrap() = Complex32::new(100.0, 100.0);
            }
        }
        assert!(compare(&a, &b, dims, 1e-6).unwrap().is_match());
    }

    #[test]
    fn dims_must_match_both_spectra() {
        let (a, _) = pair(Dims::square(4));
        let (_, b) = pair(Dims::square(8));
        assert!(compare(&a, &b, Dims::square(4), 1e-6).is_err());
    }

    #[test]
    fn max_diff_finds_peak() {
        let dims = Dims::square(4);
        let (mut a, b) = pair(dims);
        a.get_mut(3, 2).unwrap().im = -0.5;
        a.get_mut(1, 0).unwrap().re = 0.25;
        let peak = max_abs_diff(&a, &b, dims).unwrap();
        assert_eq!(
            peak,
            CellDiff {
                diff: 0.5,
                row: 3,
                col: 2
            }
        );
    }

    proptest! {
        #[test]
        fn prop_compare_is_symmetric(
            values in proptest::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 2 * 4 * 3),
            tolerance in 0.0f64..0.5,
        ) {
            let dims = Dims::new(4, 4);
            let mut a = Spectrum::zeros(dims, SpectrumLayout::Half).unwrap();
            let mut b = Spectrum::zeros(dims, SpectrumLayout::Half).unwrap();
            let (left, right) = values.split_at(4 * 3);
            for (dst, &(re, im)) in a.as_mut_slice().iter_mut().zip(left) {
                *dst = Complex32::new(re, im);
            }
            for (dst, &(re, im)) in b.as_mut_slice().iter_mut().zip(right) {
                *dst = Complex32::new(re, im);
            }
            let ab = compare(&a, &b, dims, tolerance).unwrap();
            let ba = compare(&b, &a, dims, tolerance).unwrap();
            prop_assert_eq!(ab, ba);
            if let Comparison::Mismatch(d) = ab {
                prop_assert!(d.row < dims.height && d.col <= dims.width / 2);
                prop_assert!(f64::from(d.diff) > tolerance);
            }
        }
    }
}
