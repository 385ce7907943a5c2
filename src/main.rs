use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use r2c_bench::backends::BackendKind;
use r2c_bench::config::{
    BenchConfig, DEFAULT_RUNS, DEFAULT_SEED, DEFAULT_SIZE, DEFAULT_TOLERANCE,
};
use r2c_bench::harness::Harness;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Backend {
    Realfft,
    Rustfft,
}

impl From<Backend> for BackendKind {
    fn from(b: Backend) -> Self {
        match b {
            Backend::Realfft => BackendKind::RealFft,
            Backend::Rustfft => BackendKind::RustFft,
        }
    }
}

/// Time a 2D real-to-complex FFT on two back-ends and check that they agree.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Edge length of the square input matrix
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Executions in the averaged phase
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: usize,

    /// Seed for the random input
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Largest accepted |dre| + |dim| per frequency bin
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// First back-end
    #[arg(long, value_enum, default_value_t = Backend::Realfft)]
    first: Backend,

    /// Second back-end
    #[arg(long, value_enum, default_value_t = Backend::Rustfft)]
    second: Backend,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = BenchConfig {
        size: args.size,
        runs: args.runs,
        seed: args.seed,
        tolerance: args.tolerance,
    };
    let first = BackendKind::from(args.first).backend();
    let second = BackendKind::from(args.second).backend();
    let harness = Harness::new(config, first.as_ref(), second.as_ref())
        .context("invalid benchmark configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let run = harness
            .run(&mut io::sink())
            .context("benchmark run failed")?;
        run.report
            .write_json(&mut out)
            .context("failed to write report")?;
    } else {
        harness.run(&mut out).context("benchmark run failed")?;
    }
    out.flush().context("failed to flush stdout")?;
    // A numerical mismatch is reported above but never changes the exit code.
    Ok(())
}
