#[cfg(not(test))]
use anyhow::Result;
use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for r2c-bench")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    /// Run fmt, then clippy if formatting succeeded
    Analyze,
    /// Release run of the comparison harness (extra flags via R2C_BENCH_ARGS)
    Bench,
    /// Criterion benches for plan and execute
    Criterion,
}

#[cfg(not(test))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    match cli.command {
        Commands::Build => run(build_command()),
        Commands::Test => run(test_command()),
        Commands::Clippy => run(clippy_command()),
        Commands::Fmt => run(fmt_command()),
        Commands::Analyze => {
            run(fmt_command())?;
            run(clippy_command())
        }
        Commands::Bench => run(bench_command(&cfg)),
        Commands::Criterion => run(criterion_command(&cfg)),
    }
}
