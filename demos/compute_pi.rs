// ============================================================================
// Compute Pi Example
// ============================================================================
//
// Usage: cargo run --release --example compute_pi --features logging -- [DIGITS] [THREADS]
//
// Writes "3." followed by DIGITS digits to pi.txt in the current directory.

use chudnovsky_pi::prelude::*;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

fn parse_arg<T: std::str::FromStr>(position: usize, default: T) -> Result<T, String> {
    match env::args().nth(position) {
        Some(raw) => raw
            .replace(['_', ','], "")
            .parse()
            .map_err(|_| format!("argument {} is not a valid number: {}", position, raw)),
        None => Ok(default),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = match (parse_arg(1, 1_000_000u64), parse_arg(2, 0usize)) {
        (Ok(digits), Ok(0)) => ComputeConfig::record_attempt(digits),
        (Ok(digits), Ok(threads)) => ComputeConfig::record_attempt(digits).with_threads(threads),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    println!("=== Chudnovsky Pi ===\n");
    println!("Digits:   {}", config.digits);
    println!("Threads:  {}", config.threads);

    let engine = match create_from_config(config, Arc::new(LoggingProgressObserver::new())) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        },
    };

    let report = match engine.run(&FileStore::current_dir()) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("computation failed: {}", err);
            return ExitCode::FAILURE;
        },
    };

    println!("Terms:    {}", report.plan.terms());
    println!("Strategy: {}\n", report.multiplier);
    for timing in &report.phases {
        println!("{:<20} {:>10.3} s", timing.phase, timing.elapsed.as_secs_f64());
    }
    println!("{:<20} {:>10.3} s\n", "total", report.elapsed().as_secs_f64());

    let tail = report.digits.len().saturating_sub(20);
    println!("Last digits: ...{}", &report.digits[tail..]);

    match &report.persist_error {
        None => {
            println!("Written to {}", engine.config().output_name);
            ExitCode::SUCCESS
        },
        Some(err) => {
            eprintln!("digits computed but not saved: {}", err);
            ExitCode::FAILURE
        },
    }
}
