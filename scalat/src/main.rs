//! Scalat - syntax checker for Scala-style source trees.
//!
//! Walks the given roots for `.scala` files, parses each one with its own
//! recognizer instance, and tallies the outcomes. The exit code is zero
//! iff every non-skipped file matched its expected outcome.

mod check;
mod error;
mod trace;
mod walk;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use check::{check_file, Outcome, Report};
use error::{Result, ScalatError};
use trace::TraceInstrument;

/// Scalat - checks that source trees parse.
///
/// Prints one line per file: `[<len>] <path>  <ok|failed|skip>`, with a
/// diagnostic block after unexpected failures. A path segment named `neg`
/// inverts the expectation for everything beneath it.
#[derive(Parser, Debug)]
#[command(name = "scalat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Syntax checker for Scala-style source trees", long_about = None)]
struct Cli {
    /// Directories (or single files) to check
    #[arg(default_value = ".")]
    roots: Vec<PathBuf>,

    /// Count invocations of the given grammar rule (e.g. Type) and print
    /// the totals per cursor offset; forces sequential checking
    #[arg(long, value_name = "RULE")]
    trace: Option<String>,

    /// Enable verbose output
    #[arg(short, long, env = "SCALAT_VERBOSE")]
    verbose: bool,

    /// Disable color in log output
    #[arg(long, env = "SCALAT_NO_COLOR")]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("scalat: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("scalat: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    let layer = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| ScalatError::Logging(e.to_string()))?;
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let files = walk::collect_sources(&cli.roots).context("discovering sources")?;
    tracing::debug!(count = files.len(), "discovered sources");

    let mut trace_report = None;
    let reports = match &cli.trace {
        Some(rule) => {
            let mut instrument = TraceInstrument::new(rule.clone());
            let reports = files
                .iter()
                .map(|path| {
                    check_file(path, |contents| {
                        scalar_syn::parse_traced(contents, |name, offset| {
                            instrument.record(name, offset);
                        })
                    })
                })
                .collect::<Vec<_>>();
            trace_report = Some(instrument.report());
            reports
        }
        None => files
            .par_iter()
            .map(|path| check_file(path, scalar_syn::parse))
            .collect::<Vec<_>>(),
    };

    let mut all_passed = true;
    for report in &reports {
        print_report(report);
        all_passed &= report.passed();
    }
    if let Some(trace_report) = trace_report {
        print!("{trace_report}");
    }
    Ok(all_passed)
}

fn print_report(report: &Report) {
    println!(
        "[{}] {}  {}",
        report.len,
        report.path.display(),
        report.status()
    );
    if let Outcome::Fail(Some(err)) = &report.outcome {
        println!("  {err}");
        for line in err.formatted_line().lines() {
            println!("  {line}");
        }
        if !err.trace.is_empty() {
            println!("  in {}", err.formatted_trace());
        }
    }
}
