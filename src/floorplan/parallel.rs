// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Partitioned search across worker threads.
//!
//! The order space is split into contiguous, disjoint ranges. Each range is
//! searched on a rayon worker by its own [`FloorplanSolver`], so no state is
//! shared between threads. The results are then reduced to the least area,
//! ties going to the range that starts first.
//!
//! ```text
//! offset                                                  end
//!   |---- worker 0 ----|---- worker 1 ----|---- worker 2 ---|
//! ```

use super::sequence::SequencePair;
use super::solver::{FloorplanConfig, FloorplanSolver, SearchOutcome, SearchRange};
use crate::error::FloorplanError;
use crate::instance::FloorplanInstance;
use rayon::prelude::*;

/// Search the whole order space with `workers` parallel workers.
pub fn solve_partitioned(
    instance: &FloorplanInstance,
    workers: usize,
) -> Result<SearchOutcome, FloorplanError> {
    solve_parallel(instance, &FloorplanConfig::default().with_workers(workers))
}

/// Search the configured range, split across the configured workers.
pub fn solve_parallel(
    instance: &FloorplanInstance,
    config: &FloorplanConfig,
) -> Result<SearchOutcome, FloorplanError> {
    let limit = SequencePair::new(instance.n_rectangles())?.order_count();
    let start = config.range.offset;
    if start >= limit {
        return Err(FloorplanError::OrderOutOfRange {
            order: start,
            limit,
        });
    }
    let end = match config.range.max_iterations {
        Some(max) => limit.min(start + u128::from(max.max(1))),
        None => limit,
    };
    let (first, rest) = partition(start, end, config.workers)?;
    tracing::debug!(
        workers = rest.len() + 1,
        start = %start,
        end = %end,
        "partitioned floorplan search"
    );

    let (first, rest) = rayon::join(
        || solve_range(instance, first),
        || {
            rest.into_par_iter()
                .map(|range| solve_range(instance, range))
                .collect::<Result<Vec<_>, _>>()
        },
    );
    let first = first?;

    let mut statistics = first.statistics;
    let mut iterations = first.iterations;
    let mut best = first.floorplan;
    // Ranges are in ascending order, so a strict comparison keeps the earliest.
    for outcome in rest? {
        statistics.merge(&outcome.statistics);
        iterations += outcome.iterations;
        if outcome.floorplan.area() < best.area() {
            best = outcome.floorplan;
        }
    }
    let proven_optimal =
        best.area() <= instance.area_lower_bound()? || (start == 0 && end == limit);

    Ok(SearchOutcome {
        floorplan: best,
        iterations,
        proven_optimal,
        statistics,
    })
}

fn solve_range(
    instance: &FloorplanInstance,
    range: SearchRange,
) -> Result<SearchOutcome, FloorplanError> {
    FloorplanSolver::new(instance)?.solve(range)
}

/// Split the non-empty `start..end` into at most `workers` contiguous ranges
/// of nearly equal length: the first range, then the rest in order.
fn partition(
    start: u128,
    end: u128,
    workers: usize,
) -> Result<(SearchRange, Vec<SearchRange>), FloorplanError> {
    if workers == 0 {
        return Err(FloorplanError::NoWorkers);
    }
    let chunk = (end - start).div_ceil(workers as u128).max(1);
    let range_at = |offset: u128| SearchRange {
        offset,
        max_iterations: Some(u64::try_from(chunk.min(end - offset)).unwrap_or(u64::MAX)),
    };
    let first = range_at(start);
    let mut rest = Vec::with_capacity(workers - 1);
    let mut offset = start + chunk;
    while offset < end {
        rest.push(range_at(offset));
        offset += chunk;
    }
    Ok((first, rest))
}
