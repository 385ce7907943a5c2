//! # r2c-bench - 2D real-to-complex FFT back-end comparison
//!
//! Generates one seeded random square matrix, runs the same forward
//! real-to-complex 2D transform through two FFT back-ends, and reports:
//!
//! - plan build time and the first execution time of each back-end
//! - the average execution time over repeated calls reusing the plan
//! - whether both outputs agree within an absolute tolerance
//!
//! ## Back-ends
//!
//! | Name | Crates | Output layout |
//! |------|--------|---------------|
//! | `realfft` | `realfft` rows, `rustfft` columns | half spectrum (`width/2 + 1` columns) |
//! | `rustfft` | `rustfft` on both axes | full spectrum (`width` columns) |
//!
//! New back-ends implement [`backend::R2cBackend`]; the comparator and the
//! report only see [`spectrum::Spectrum`] values tagged with their layout.
//!
//! ## Example
//!
//! ```no_run
//! use r2c_bench::backends::{RealFft2d, RustFft2d};
//! use r2c_bench::config::BenchConfig;
//! use r2c_bench::harness::Harness;
//!
//! let harness = Harness::new(BenchConfig::default(), &RealFft2d, &RustFft2d)?;
//! let run = harness.run(&mut std::io::stdout())?;
//! println!("agree: {}", run.report.comparison.is_match());
//! # Ok::<(), r2c_bench::error::BenchError>(())
//! ```

/// Back-end capability traits.
pub mod backend;
/// `realfft` and `rustfft` implementations of [`backend::R2cBackend`].
pub mod backends;
mod buffer;
pub mod compare;
pub mod config;
pub mod error;
pub mod harness;
pub mod report;
/// Seeded input generation.
pub mod signal;
/// Dimensions, layouts and spectrum storage.
pub mod spectrum;

pub use backend::{R2cBackend, R2cPlan};
pub use compare::{compare, Comparison};
pub use config::BenchConfig;
pub use error::BenchError;
pub use harness::{BenchRun, Harness};
pub use signal::Signal;
pub use spectrum::{Dims, Spectrum, SpectrumLayout};
