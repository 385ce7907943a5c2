//! Heap buffer helpers used by the signal generator and the transform plans.

use crate::error::BenchError;

/// Allocate `len` copies of `value`, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_vec<T: Clone>(
    what: &'static str,
    len: usize,
    value: T,
) -> Result<Vec<T>, BenchError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BenchError::Allocation { what, len })?;
    buf.resize(len, value);
    Ok(buf)
}

/// Out-of-place transpose of a row-major `rows x cols` matrix.
///
/// `dst` receives the `cols x rows` result.
pub(crate) fn transpose<T: Copy>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);
    for (r, row) in src.chunks_exact(cols).enumerate() {
        for (c, &v) in row.iter().enumerate() {
            dst[c * rows + r] = v;
        }
    }
}
