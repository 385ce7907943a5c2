//! Concrete back-ends wrapping the `realfft` and `rustfft` crates.

mod realfft2d;
mod rustfft2d;

pub use realfft2d::{RealFft2d, RealFft2dPlan};
pub use rustfft2d::{RustFft2d, RustFft2dPlan};

use crate::backend::R2cBackend;

/// Back-ends known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Half-spectrum output via `realfft` rows and `rustfft` columns.
    RealFft,
    /// Full output via complex `rustfft` on both axes.
    RustFft,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::RealFft, BackendKind::RustFft];

    pub fn backend(self) -> Box<dyn R2cBackend> {
        match self {
            BackendKind::RealFft => Box::new(RealFft2d),
            BackendKind::RustFft => Box::new(RustFft2d),
        }
    }
}
