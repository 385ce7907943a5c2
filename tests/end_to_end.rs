// Test intent: verifies whole-pipeline behavior of both back-ends and the comparator.
use r2c_bench::backends::{BackendKind, RealFft2d, RustFft2d};
use r2c_bench::{compare, BenchConfig, Comparison, Dims, Harness, R2cBackend, Signal};

fn transform(backend: &dyn R2cBackend, signal: &Signal) -> r2c_bench::Spectrum {
    let mut plan = backend.plan(signal.dims()).unwrap();
    let mut out = plan.make_output().unwrap();
    plan.execute(signal, &mut out).unwrap();
    out
}

#[test]
fn zero_signal_gives_zero_spectra() {
    let dims = Dims::square(4);
    let signal = Signal::zeros(dims).unwrap();
    let a = transform(&RealFft2d, &signal);
    let b = transform(&RustFft2d, &signal);
    assert!(a.as_slice().iter().all(|c| c.re == 0.0 && c.im == 0.0));
    assert!(b.as_slice().iter().all(|c| c.re == 0.0 && c.im == 0.0));
    assert_eq!(compare(&a, &b, dims, 1e-6).unwrap(), Comparison::Match);
}

#[test]
fn perturbed_cell_is_reported_exactly() {
    let dims = Dims::square(16);
    let signal = Signal::random(dims, 114514).unwrap();
    let a = transform(&RealFft2d, &signal);
    let mut b = transform(&RustFft2d, &signal);
    assert!(compare(&a, &b, dims, 1e-3).unwrap().is_match());

    b.get_mut(5, 3).unwrap().re += 1.0;
    match compare(&a, &b, dims, 1e-3).unwrap() {
        Comparison::Mismatch(d) => {
            assert_eq!((d.row, d.col), (5, 3));
            assert!(d.diff > 0.99 && d.diff < 1.01, "diff {}", d.diff);
        }
        Comparison::Match => panic!("perturbation went unnoticed"),
    }
}

#[test]
fn back_ends_agree_on_non_square_input() {
    let dims = Dims::new(12, 20);
    let signal = Signal::random(dims, 42).unwrap();
    let a = transform(&RealFft2d, &signal);
    let b = transform(&RustFft2d, &signal);
    assert!(compare(&a, &b, dims, 1e-3).unwrap().is_match());
    assert!(compare(&b, &a, dims, 1e-3).unwrap().is_match());
}

#[test]
fn every_backend_is_idempotent() {
    let dims = Dims::square(32);
    let signal = Signal::random(dims, 3).unwrap();
    for kind in BackendKind::ALL {
        let backend = kind.backend();
        let mut plan = backend.plan(dims).unwrap();
        let mut first = plan.make_output().unwrap();
        let mut second = plan.make_output().unwrap();
        plan.execute(&signal, &mut first).unwrap();
        plan.execute(&signal, &mut second).unwrap();
        assert_eq!(first, second, "{} is not deterministic", backend.name());
    }
}

#[test]
fn averaged_phase_excludes_planning() {
    let config = BenchConfig {
        size: 64,
        runs: 20,
        seed: 1,
        tolerance: 1e-2,
    };
    let harness = Harness::new(config, &RealFft2d, &RustFft2d).unwrap();
    let run = harness.run(&mut std::io::sink()).unwrap();
    for t in &run.report.backends {
        assert_eq!(t.runs, 20);
        // Plan time is recorded separately and never folded into the repeated phase.
        assert!(t.average() <= t.total);
        assert!(t.average() * 20 <= t.total + std::time::Duration::from_micros(1));
    }
    assert!(run.report.comparison.is_match());
}
