// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable bookkeeping shared by both solvers.

pub mod statistics;

pub use statistics::{Counter, Statistics};
