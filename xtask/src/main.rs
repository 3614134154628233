use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for sigkit")]
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
    /// fmt followed by clippy
    Analyze,
    /// Criterion benchmarks in sigkit-bench
    Bench,
    /// Run the demo matching the detected feature set
    Demo,
}

#[cfg(not(test))]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    let status = match cli.command {
        Commands::Build => run(build_command(&cfg))?,
        Commands::Test => run(test_command(&cfg))?,
        Commands::Clippy => run(clippy_command())?,
        Commands::Fmt => run(fmt_command())?,
        Commands::Analyze => {
            let fmt = run(fmt_command())?;
            if !fmt.success() {
                fmt
            } else {
                run(clippy_command())?
            }
        }
        Commands::Bench => run(bench_command(&cfg))?,
        Commands::Demo => run(demo_command(&cfg))?,
    };

    std::process::exit(status.code().unwrap_or(1));
}
