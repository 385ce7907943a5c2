//! Benchmark driver.
//!
//! Runs the fixed sequence: generate the signal, plan and execute each
//! back-end once, repeat each back-end `runs` times, compare the latest
//! outputs. Each section of the text report is written as soon as its
//! phase finishes.

use std::io::Write;
use std::time::Instant;

use crate::backend::{R2cBackend, R2cPlan};
use crate::compare::{compare, max_abs_diff, Comparison};
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::report::{
    label_width, write_average_header, write_average_line, write_single, write_verdict,
    BackendTimings, BenchReport,
};
use crate::signal::Signal;
use crate::spectrum::{Dims, Spectrum};

/// Result of a harness run: the report plus both final spectra.
#[derive(Debug)]
pub struct BenchRun {
    pub report: BenchReport,
    pub first: Spectrum,
    pub second: Spectrum,
}

/// Compares two back-ends under one configuration.
pub struct Harness<'a> {
    config: BenchConfig,
    first: &'a dyn R2cBackend,
    second: &'a dyn R2cBackend,
}

impl<'a> Harness<'a> {
    pub fn new(
        config: BenchConfig,
        first: &'a dyn R2cBackend,
        second: &'a dyn R2cBackend,
    ) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self {
            config,
            first,
            second,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Execute every phase, streaming the text report to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<BenchRun, BenchError> {
        let dims = self.config.dims();
        let signal = Signal::random(dims, self.config.seed)?;

        let mut first = Phase::start(self.first, dims, &signal)?;
        let mut second = Phase::start(self.second, dims, &signal)?;
        let single = [first.timings.clone(), second.timings.clone()];
        let width = label_width(&single);
        write_single(out, &single)?;
        out.flush()?;

        write_average_header(out, self.config.runs)?;
        for phase in [&mut first, &mut second] {
            phase.repeat(&signal, self.config.runs)?;
            write_average_line(out, &phase.timings, width)?;
            out.flush()?;
        }
        writeln!(out)?;

        let comparison = compare(&first.output, &second.output, dims, self.config.tolerance)?;
        let max_diff = max_abs_diff(&first.output, &second.output, dims)?;
        match comparison {
            Comparison::Match => log::info!(
                "outputs agree within {} (max difference {})",
                self.config.tolerance,
                max_diff.diff
            ),
            Comparison::Mismatch(d) => log::warn!(
                "{} and {} disagree by {} at ({}, {})",
                first.timings.name,
                second.timings.name,
                d.diff,
                d.row,
                d.col
            ),
        }
        write_verdict(out, &comparison)?;
        out.flush()?;

        let report = BenchReport {
            config: self.config,
            backends: vec![first.timings, second.timings],
            comparison,
            max_diff,
        };
        Ok(BenchRun {
            report,
            first: first.output,
            second: second.output,
        })
    }
}

/// One back-end's plan, output buffer and measurements.
struct Phase {
    plan: Box<dyn R2cPlan>,
    output: Spectrum,
    timings: BackendTimings,
}

impl Phase {
    /// Build the plan and run it once, timing both.
    fn start(backend: &dyn R2cBackend, dims: Dims, signal: &Signal) -> Result<Self, BenchError> {
        let mut timings = BackendTimings::new(backend.name(), backend.layout());

        let tic = Instant::now();
        let mut plan = backend.plan(dims)?;
        timings.plan = tic.elapsed();

        let mut output = plan.make_output()?;
        let tic = Instant::now();
        plan.execute(signal, &mut output)?;
        timings.single = tic.elapsed();

        log::info!(
            "{}: plan {:?}, first execution {:?}",
            timings.name,
            timings.plan,
            timings.single
        );
        Ok(Self {
            plan,
            output,
            timings,
        })
    }

    /// Execute `runs` times back-to-back with the existing plan.
    fn repeat(&mut self, signal: &Signal, runs: usize) -> Result<(), BenchError> {
        let tic = Instant::now();
        for _ in 0..runs {
            self.plan.execute(signal, &mut self.output)?;
        }
        self.timings.total = tic.elapsed();
        self.timings.runs = runs;
        log::info!(
            "{}: {} executions in {:?} ({:?} each)",
            self.timings.name,
            runs,
            self.timings.total,
            self.timings.average()
        );
        Ok(())
    }
}
