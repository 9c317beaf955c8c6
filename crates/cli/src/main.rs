//! javac-exec CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse flags**: `--spec` (JSON compile spec), `--executable` (optional
//!    override), `--log-format`.
//! 2. **Wire observability**: configure `tracing-subscriber` with an `EnvFilter`
//!    (`RUST_LOG`, default `info`) and a pretty or JSON layer on stderr.
//! 3. **Construct infrastructure**: the production compiler from `exec`.
//! 4. **Run one compile step**: exit 0 on success; on failure print the
//!    `BuildStepFailure` report as JSON on stdout and exit 1. A spec that
//!    cannot be read or parsed is logged and exits 2.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use compile::{BuildStepFailure, Compiler};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "javac-exec",
    version,
    about = "Run an external Java compiler for one compilation unit"
)]
struct Args {
    /// Path to the JSON compile spec.
    #[arg(long)]
    spec: PathBuf,

    /// Compiler executable to run, overriding the spec's fork options.
    #[arg(long)]
    executable: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Result of one compile step that got as far as running the compiler.
#[derive(Debug)]
enum Outcome {
    Compiled,
    Failed(BuildStepFailure),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_format);

    let result = run(args);
    match &result {
        Ok(Outcome::Compiled) => info!("Compilation succeeded"),
        Ok(Outcome::Failed(report)) => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(err) => error!("could not serialize failure report: {err}"),
        },
        Err(err) => error!("javac-exec failed: {err:#}"),
    }
    ExitCode::from(exit_code(&result))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn run(args: Args) -> Result<Outcome> {
    let spec = config::load_spec(&args.spec)?;
    let spec = config::with_executable(spec, args.executable)?;

    let compiler = exec::command_line_compiler();
    match compiler.execute(&spec) {
        Ok(_) => Ok(Outcome::Compiled),
        Err(err) => Ok(Outcome::Failed(err.report())),
    }
}

/// Process exit code: 0 compiled, 1 compile step failed, 2 unusable input.
fn exit_code(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Compiled) => 0,
        Ok(Outcome::Failed(_)) => 1,
        Err(_) => 2,
    }
}
