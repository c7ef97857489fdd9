// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line front ends for the two solvers.
//!
//! Results go to standard output; logging goes to standard error and is
//! controlled by `RUST_LOG` (default `warn`, or `debug` with `--verbose`).

use crate::floorplan::{solve_parallel, FloorplanConfig};
use crate::parser::{read_floorplan_instance, read_grid_instance};
use crate::steiner::{BoundOptions, SteinerConfig, SteinerSolver};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "steiner", version, about = "Exact 3D rectilinear Steiner minimal trees")]
pub struct SteinerArgs {
    /// Instance file: a count, then one "x y z" line per terminal
    pub file: PathBuf,

    /// Lower bounds to use: ALL, OT (one-tree), BB (bounding box) or NONE
    #[arg(default_value = "ALL")]
    pub bounds: BoundOptions,

    /// Log search progress to standard error
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
pub enum OutputMode {
    /// Include each rectangle's width and height
    Full,
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", version, about = "Minimum-area floorplans by sequence-pair enumeration")]
pub struct FloorplanArgs {
    /// Instance file: a count, then one "width height" line per rectangle
    pub file: PathBuf,

    /// Output mode
    #[arg(value_enum, ignore_case = true)]
    pub mode: Option<OutputMode>,

    /// Number of parallel workers
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Linear order number to start the search from
    #[arg(long, default_value_t = 0)]
    pub offset: u128,

    /// Stop after evaluating this many orders
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Log search progress to standard error
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse `args`, solve, and write the result or an `error:` line to `out`.
///
/// Returns the process exit code. `--help` and `--version` exit through clap.
pub fn steiner_main<I, T>(args: I, out: &mut impl Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match SteinerArgs::try_parse_from(args) {
        Ok(args) => {
            init_logging(args.verbose);
            report(run_steiner(&args), out)
        }
        Err(err) => report_usage(err, out),
    }
}

/// Parse `args`, solve, and write the placement or an `error:` line to `out`.
///
/// Returns the process exit code. `--help` and `--version` exit through clap.
pub fn floorplan_main<I, T>(args: I, out: &mut impl Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match FloorplanArgs::try_parse_from(args) {
        Ok(args) => {
            init_logging(args.verbose);
            report(run_floorplan(&args), out)
        }
        Err(err) => report_usage(err, out),
    }
}

fn report(result: Result<String>, out: &mut impl Write) -> i32 {
    let written = match &result {
        Ok(output) => write!(out, "{output}"),
        Err(err) => writeln!(out, "error: {err:#}"),
    };
    if written.is_err() || result.is_err() {
        1
    } else {
        0
    }
}

fn report_usage(err: clap::Error, out: &mut impl Write) -> i32 {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
    }
    // clap renders "error: <message>" followed by usage hints.
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    let message = first.strip_prefix("error: ").unwrap_or(first);
    let _ = writeln!(out, "error: {message}");
    1
}

/// Solve a Steiner instance file and format the tree length.
pub fn run_steiner(args: &SteinerArgs) -> Result<String> {
    let config = SteinerConfig::default().with_bounds(args.bounds);
    let instance = read_grid_instance(&args.file, config.coordinate_scale)?;

    let mut solver = SteinerSolver::new(&instance, config);
    let solution = solver
        .solve()
        .with_context(|| format!("search failed for {}", args.file.display()))?;
    tracing::debug!(statistics = %solver.statistics(), "steiner statistics");
    tracing::info!(length = solution.length(), iterations = solution.iterations, "solved");

    Ok(format!("{}\n", solution.length()))
}

/// Solve a floorplanning instance file and format the placement.
pub fn run_floorplan(args: &FloorplanArgs) -> Result<String> {
    let instance = read_floorplan_instance(&args.file)?;
    anyhow::ensure!(instance.verify(), "invalid rectangles in {}", args.file.display());

    let mut config = FloorplanConfig::default()
        .with_offset(args.offset)
        .with_workers(args.workers);
    if let Some(max) = args.max_iterations {
        config = config.with_max_iterations(max);
    }

    let outcome = solve_parallel(&instance, &config)?;
    outcome
        .floorplan
        .verify()
        .context("floorplan failed verification")?;
    tracing::debug!(statistics = %outcome.statistics, "floorplan statistics");
    if outcome.proven_optimal {
        tracing::info!(area = outcome.floorplan.area(), iterations = outcome.iterations, "solved");
    } else {
        tracing::warn!(
            area = outcome.floorplan.area(),
            iterations = outcome.iterations,
            "search covered only part of the order space; the area may not be minimal"
        );
    }

    Ok(outcome.floorplan.render(args.mode == Some(OutputMode::Full)))
}
