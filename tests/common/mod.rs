// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use vlsi_exact::geometry::Point3;

pub fn points(coords: &[(i64, i64, i64)]) -> Vec<Point3> {
    coords.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect()
}

/// Minimum spanning tree length by Prim's algorithm.
pub fn mst(points: &[Point3]) -> u64 {
    if points.len() <= 1 {
        return 0;
    }
    let mut in_tree = vec![false; points.len()];
    let mut best = vec![u64::MAX; points.len()];
    best[0] = 0;
    let mut total = 0;
    for _ in 0..points.len() {
        let next = (0..points.len())
            .filter(|&k| !in_tree[k])
            .min_by_key(|&k| best[k])
            .unwrap();
        in_tree[next] = true;
        total += best[next];
        for k in 0..points.len() {
            if !in_tree[k] {
                best[k] = best[k].min(points[next].rect_distance(&points[k]));
            }
        }
    }
    total
}

/// Rectilinear Steiner minimal tree length by exhaustive search: the least
/// MST over the terminals plus at most `n - 2` Hanan grid points.
pub fn brute_force_rsmt(terminals: &[Point3]) -> u64 {
    let axis = |f: fn(&Point3) -> i64| {
        let mut values: Vec<i64> = terminals.iter().map(f).collect();
        values.sort_unstable();
        values.dedup();
        values
    };
    let (xs, ys, zs) = (axis(|p| p.x), axis(|p| p.y), axis(|p| p.z));
    let mut candidates = Vec::new();
    for &x in &xs {
        for &y in &ys {
            for &z in &zs {
                let p = Point3::new(x, y, z);
                if !terminals.contains(&p) {
                    candidates.push(p);
                }
            }
        }
    }

    let max_steiner = terminals.len().saturating_sub(2);
    let mut chosen = terminals.to_vec();
    let mut best = mst(&chosen);
    extend_steiner_set(&candidates, 0, max_steiner, &mut chosen, &mut best);
    best
}

fn extend_steiner_set(
    candidates: &[Point3],
    from: usize,
    remaining: usize,
    chosen: &mut Vec<Point3>,
    best: &mut u64,
) {
    if remaining == 0 {
        return;
    }
    for k in from..candidates.len() {
        chosen.push(candidates[k]);
        *best = (*best).min(mst(chosen));
        extend_steiner_set(candidates, k + 1, remaining - 1, chosen, best);
        chosen.pop();
    }
}

/// Write `contents` to a fresh file in the temporary directory.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vlsi-exact-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}
