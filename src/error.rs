// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! Three kinds of failure are distinguished:
//! - [`ParseError`]: the input file is malformed or out of range.
//! - [`SteinerError`]: an internal invariant of the label search was violated.
//! - [`FloorplanError`]: counting overflow, invalid ranges, or an invalid placement.
//!
//! A search that stops at an iteration cap is not an error; see
//! [`SearchOutcome::proven_optimal`](crate::floorplan::SearchOutcome).

use crate::geometry::Point3;
use std::path::PathBuf;
use thiserror::Error;

/// Errors detected while reading an instance file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no count given on the first line")]
    MissingCount,

    #[error("line {line}: invalid count {text:?}")]
    InvalidCount { line: usize, text: String },

    #[error("line {line}: count {count} exceeds the maximum of {max}")]
    TooMany { line: usize, count: usize, max: usize },

    #[error("line {line}: count must be at least {min}")]
    TooFew { line: usize, min: usize },

    #[error("line {line}: expected {expected} integers, found {text:?}")]
    MalformedLine {
        line: usize,
        expected: usize,
        text: String,
    },

    #[error("line {line}: value {value} outside {min}..={max}")]
    OutOfRange {
        line: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("line {line}: duplicate of the point on line {first}")]
    DuplicateTerminal { line: usize, first: usize },

    #[error("expected {expected} records, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("line {line}: unexpected data after the last record")]
    TrailingData { line: usize },
}

/// Invariant violations inside the Dijkstra-Steiner search.
///
/// None of these should occur for a validly constructed instance with
/// admissible bounds; they indicate a bug rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteinerError {
    #[error("instance has no terminals")]
    NoTerminals,

    #[error("{count} terminals exceed the supported maximum of {max}")]
    TooManyTerminals { count: usize, max: usize },

    #[error("one-tree bound: no second-nearest terminal for vertex {vertex} and subset {subset}")]
    NoSecondNearest { vertex: usize, subset: u64 },

    #[error("distance query on subset {subset} with an empty side")]
    EmptyPartition { subset: u64 },

    #[error("coordinates of {point} overflow when scaled by {scale}")]
    CoordinateOverflow { point: Point3, scale: i64 },

    #[error("priority queue exhausted after {iterations} iterations without settling the root label")]
    QueueExhausted { iterations: u64 },
}

/// Failures of the sequence-pair floorplanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FloorplanError {
    #[error("{n}! does not fit in 64 bits")]
    FactorialOverflow { n: usize },

    #[error("order {order} out of range (limit {limit})")]
    OrderOutOfRange { order: u128, limit: u128 },

    #[error("area {width} x {height} overflows")]
    AreaOverflow { width: u64, height: u64 },

    #[error("total rectangle area overflows")]
    TotalAreaOverflow,

    #[error("rectangle {rectangle}: coordinate {coordinate} is smaller than its extent {extent}")]
    CoordinateUnderflow {
        rectangle: usize,
        coordinate: u64,
        extent: u64,
    },

    #[error("expected {expected} coordinates, got {found}")]
    CoordinateCount { expected: usize, found: usize },

    #[error("rectangles {first} and {second} overlap")]
    Overlap { first: usize, second: usize },

    #[error("rectangle {rectangle} extends beyond the {width} x {height} chip")]
    OutOfBounds {
        rectangle: usize,
        width: u64,
        height: u64,
    },

    #[error("worker count must be positive")]
    NoWorkers,
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Steiner(#[from] SteinerError),

    #[error(transparent)]
    Floorplan(#[from] FloorplanError),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
