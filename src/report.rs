//! Human-readable and JSON rendering of benchmark results.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::compare::{CellDiff, Comparison};
use crate::config::BenchConfig;
use crate::spectrum::SpectrumLayout;

/// Wall-clock measurements for one back-end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendTimings {
    pub name: &'static str,
    pub layout: SpectrumLayout,
    /// Time spent building the plan.
    #[serde(rename = "plan_secs", serialize_with = "secs")]
    pub plan: Duration,
    /// First execution right after planning.
    #[serde(rename = "single_secs", serialize_with = "secs")]
    pub single: Duration,
    /// All executions of the repeated phase.
    #[serde(rename = "total_secs", serialize_with = "secs")]
    pub total: Duration,
    pub runs: usize,
}

impl BackendTimings {
    pub fn new(name: &'static str, layout: SpectrumLayout) -> Self {
        Self {
            name,
            layout,
            plan: Duration::ZERO,
            single: Duration::ZERO,
            total: Duration::ZERO,
            runs: 0,
        }
    }

    /// Mean duration of one execution in the repeated phase.
    pub fn average(&self) -> Duration {
        if self.runs == 0 {
            return Duration::ZERO;
        }
        self.total.div_f64(self.runs as f64)
    }
}

fn secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Everything one harness run measured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub config: BenchConfig,
    pub backends: Vec<BackendTimings>,
    pub comparison: Comparison,
    pub max_diff: CellDiff,
}

impl BenchReport {
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let width = label_width(&self.backends);
        write_single(out, &self.backends)?;
        write_average_header(out, self.config.runs)?;
        for t in &self.backends {
            write_average_line(out, t, width)?;
        }
        writeln!(out)?;
        write_verdict(out, &self.comparison)
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// Column width that aligns `name:` labels.
pub fn label_width(timings: &[BackendTimings]) -> usize {
    timings.iter().map(|t| t.name.len() + 1).max().unwrap_or(0)
}

fn label(name: &str, width: usize) -> String {
    format!("{:<width$}", format!("{name}:"))
}

/// Single-call timings, each with the plan cost that preceded it.
pub fn write_single<W: Write>(out: &mut W, timings: &[BackendTimings]) -> io::Result<()> {
    let width = label_width(timings);
    writeln!(out, "Single execution time (s):")?;
    for t in timings {
        writeln!(
            out,
            "{} {}\t(+Plan: {})",
            label(t.name, width),
            t.single.as_secs_f64(),
            t.plan.as_secs_f64()
        )?;
    }
    writeln!(out)
}

pub fn write_average_header<W: Write>(out: &mut W, runs: usize) -> io::Result<()> {
    writeln!(out, "Average time over {runs} executions (s):")
}

pub fn write_average_line<W: Write>(
    out: &mut W,
    timings: &BackendTimings,
    width: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        label(timings.name, width),
        timings.average().as_secs_f64()
    )
}

/// Final verdict, preceded by the first offending cell on a mismatch.
pub fn write_verdict<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    if let Comparison::Mismatch(d) = comparison {
        writeln!(out, "Error: {} at {}, {}", d.diff, d.row, d.col)?;
    }
    let word = if comparison.is_match() {
        "correct"
    } else {
        "incorrect"
    };
    writeln!(out, "Results are {word}")
}
