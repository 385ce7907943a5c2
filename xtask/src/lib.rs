use anyhow::{bail, Context, Result};
use std::env;
use std::process::Command;

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub rustflags: Option<String>,
    /// Extra arguments forwarded to the `r2c-bench` binary.
    pub bench_args: Vec<String>,
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let arch = detect_arch();
    let cpu_flags = detect_cpu_flags();
    let extra = env::var("R2C_BENCH_ARGS").unwrap_or_default();
    compute_config(&arch, &cpu_flags, &extra)
}

fn detect_arch() -> String {
    if let Ok(arch) = env::var("ARCH") {
        if !arch.trim().is_empty() {
            return arch;
        }
    }
    Command::new("uname")
        .arg("-m")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default()
}

fn detect_cpu_flags() -> String {
    if let Ok(out) = Command::new("lscpu").output() {
        let s = String::from_utf8_lossy(&out.stdout);
        for line in s.lines() {
            if line.to_lowercase().contains("flags") {
                return line.to_string();
            }
        }
    }
    if let Ok(out) = Command::new("sysctl")
        .args(["-n", "machdep.cpu.features"])
        .output()
    {
        return String::from_utf8_lossy(&out.stdout).to_string();
    }
    String::new()
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(arch: &str, cpu_flags: &str, extra: &str) -> BuildConfig {
    let rustflags = if arch.contains("x86_64") {
        if cpu_flags.contains("avx512f") {
            Some("-C target-feature=+avx512f,+avx2,+fma".into())
        } else if cpu_flags.contains("avx2") {
            Some("-C target-feature=+avx2,+fma".into())
        } else {
            None
        }
    } else if arch.contains("aarch64") || arch.contains("arm64") {
        Some("-C target-feature=+neon".into())
    } else {
        None
    };

    BuildConfig {
        rustflags,
        bench_args: extra.split_whitespace().map(str::to_string).collect(),
    }
}

pub fn build_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--workspace"]);
    cmd
}

pub fn test_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["test", "--workspace"]);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--workspace", "--all-targets"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

/// Release run of the harness with host-tuned codegen.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    cmd.args(["run", "--release", "--bin", "r2c-bench"]);
    if !cfg.bench_args.is_empty() {
        cmd.arg("--").args(&cfg.bench_args);
    }
    cmd
}

pub fn criterion_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    cmd.args(["bench", "--bench", "backends"]);
    cmd
}

/// Run `cmd` to completion, failing on a non-zero exit status.
pub fn run(mut cmd: Command) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn {program}"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_compute_x86_avx512() {
        let cfg = compute_config("x86_64", "flags: avx512f avx2 sse4_1", "");
        assert_eq!(
            cfg.rustflags.as_deref(),
            Some("-C target-feature=+avx512f,+avx2,+fma")
        );
        assert!(cfg.bench_args.is_empty());
    }

    #[test]
    fn test_compute_x86_avx2() {
        let cfg = compute_config("x86_64", "flags: avx2", "");
        assert_eq!(
            cfg.rustflags.as_deref(),
            Some("-C target-feature=+avx2,+fma")
        );
    }

    #[test]
    fn test_compute_x86_baseline() {
        let cfg = compute_config("x86_64", "flags: sse4_1", "");
        assert!(cfg.rustflags.is_none());
    }

    #[test]
    fn test_compute_aarch64_with_args() {
        let cfg = compute_config("arm64", "", "--size 1024  --runs 10");
        assert_eq!(cfg.rustflags.as_deref(), Some("-C target-feature=+neon"));
        assert_eq!(cfg.bench_args, ["--size", "1024", "--runs", "10"]);
    }

    #[test]
    fn test_bench_command_forwards_args_and_env() {
        let cfg = compute_config("x86_64", "flags: avx2", "--json");
        let cmd = bench_command(&cfg);
        assert_eq!(
            args(&cmd),
            ["run", "--release", "--bin", "r2c-bench", "--", "--json"]
        );
        assert!(cmd
            .get_envs()
            .any(|(k, v)| k == "RUSTFLAGS" && v.unwrap().to_str().unwrap().contains("avx2")));
    }

    #[test]
    fn test_bench_command_without_args() {
        let cfg = compute_config("riscv64", "", "");
        let cmd = bench_command(&cfg);
        assert!(!args(&cmd).contains(&"--".to_string()));
        assert_eq!(cmd.get_envs().count(), 0);
    }

    #[test]
    fn test_other_commands() {
        assert!(test_command().get_args().any(|a| a == "test"));
        assert!(clippy_command().get_args().any(|a| a == "clippy"));
        assert!(fmt_command().get_args().any(|a| a == "fmt"));
        assert!(build_command().get_args().any(|a| a == "build"));
        let cfg = compute_config("x86_64", "", "");
        assert_eq!(args(&criterion_command(&cfg)), ["bench", "--bench", "backends"]);
    }

    #[test]
    fn test_run_reports_failure() {
        assert!(run(Command::new("false")).is_err());
        assert!(run(Command::new("true")).is_ok());
    }
}
