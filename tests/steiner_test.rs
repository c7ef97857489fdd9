// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

mod common;

use common::{brute_force_rsmt, points, write_temp};
use vlsi_exact::cli::{run_steiner, steiner_main, SteinerArgs};
use vlsi_exact::geometry::Point3;
use vlsi_exact::instance::GridInstance;
use vlsi_exact::steiner::{BoundOptions, SteinerConfig, SteinerSolver};
use vlsi_exact::{Error, ParseError, SteinerError};

const ALL_BOUNDS: [BoundOptions; 4] = [
    BoundOptions {
        use_bounding_box: true,
        use_one_tree: true,
    },
    BoundOptions {
        use_bounding_box: false,
        use_one_tree: true,
    },
    BoundOptions {
        use_bounding_box: true,
        use_one_tree: false,
    },
    BoundOptions {
        use_bounding_box: false,
        use_one_tree: false,
    },
];

fn solve(terminals: &[Point3], bounds: BoundOptions) -> u64 {
    let instance = GridInstance::new(terminals).unwrap();
    let mut solver = SteinerSolver::new(&instance, SteinerConfig::default().with_bounds(bounds));
    solver.solve().unwrap().length()
}

#[test]
fn test_two_terminals() {
    let terminals = points(&[(0, 0, 0), (4, 6, 0)]);
    for bounds in ALL_BOUNDS {
        assert_eq!(solve(&terminals, bounds), 10);
    }
}

#[test]
fn test_l_shape() {
    let terminals = points(&[(0, 0, 0), (4, 0, 0), (4, 4, 0)]);
    for bounds in ALL_BOUNDS {
        assert_eq!(solve(&terminals, bounds), 8);
    }
}

#[test]
fn test_matches_brute_force() {
    let instances = [
        points(&[(0, 0, 0), (3, 1, 0), (1, 3, 0), (4, 4, 0)]),
        points(&[(0, 0, 0), (2, 2, 2), (0, 2, 1), (2, 0, 1)]),
        points(&[(1, 0, 0), (0, 1, 0), (2, 1, 0), (1, 2, 0), (1, 1, 3)]),
        points(&[(0, 0, 0), (5, 1, 2), (2, 4, 1)]),
        points(&[(0, 0, 0), (0, 0, 7)]),
    ];
    for terminals in &instances {
        let expected = brute_force_rsmt(terminals);
        for bounds in ALL_BOUNDS {
            assert_eq!(
                solve(terminals, bounds),
                expected,
                "terminals {:?} with bounds {}",
                terminals,
                bounds
            );
        }
    }
}

#[test]
fn test_odd_coordinates_with_one_tree_bound() {
    // Odd distances would make the halved one-tree terms inexact without
    // the coordinate scale.
    let terminals = points(&[(0, 0, 0), (3, 0, 0), (0, 5, 0), (7, 3, 1)]);
    let expected = brute_force_rsmt(&terminals);
    assert_eq!(solve(&terminals, BoundOptions::one_tree()), expected);
}

#[test]
fn test_result_does_not_depend_on_input_order() {
    let mut terminals = points(&[(0, 0, 0), (3, 1, 0), (1, 3, 0), (4, 4, 0), (2, 2, 2)]);
    let expected = solve(&terminals, BoundOptions::all());
    terminals.reverse();
    assert_eq!(solve(&terminals, BoundOptions::all()), expected);
    terminals.swap(0, 2);
    assert_eq!(solve(&terminals, BoundOptions::none()), expected);
}

#[test]
fn test_bound_selections_agree() {
    let terminals = points(&[(0, 0, 0), (6, 1, 0), (2, 7, 0), (8, 8, 1), (4, 3, 2)]);
    let instance = GridInstance::new(&terminals).unwrap();

    let lengths: Vec<u64> = ALL_BOUNDS
        .iter()
        .map(|&bounds| {
            let mut solver = SteinerSolver::new(&instance, SteinerConfig::default().with_bounds(bounds));
            let solution = solver.solve().unwrap();
            assert_eq!(solver.solution(), Some(solution));
            solution.length()
        })
        .collect();
    assert!(lengths.iter().all(|&l| l == lengths[0]));
    // No tree can be shorter than the bounding box or longer than the MST.
    assert!(lengths[0] >= 8 + 8 + 2);
    assert!(lengths[0] <= common::mst(&terminals));
}

#[test]
fn test_empty_instance_is_rejected() {
    assert_eq!(GridInstance::new(&[]).unwrap_err(), SteinerError::NoTerminals);
}

#[test]
fn test_cli_output() {
    let path = write_temp("cli-l-shape.txt", "3\n0 0 0\n4 0 0\n4 4 0\n");
    for mode in ["ALL", "OT", "BB", "NONE"] {
        let args = SteinerArgs {
            file: path.clone(),
            bounds: mode.parse().unwrap(),
            verbose: false,
        };
        assert_eq!(run_steiner(&args).unwrap(), "8\n");
    }
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_cli_reports_parse_errors() {
    let path = write_temp("cli-bad.txt", "2\n0 0 0\n");
    let args = SteinerArgs {
        file: path.clone(),
        bounds: BoundOptions::all(),
        verbose: false,
    };
    let err = run_steiner(&args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Parse(ParseError::Truncated { expected: 2, found: 1 }))
    ));
    std::fs::remove_file(path).unwrap();
}

fn run_main(args: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = steiner_main(args.iter().copied(), &mut out);
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_main_exit_codes() {
    let path = write_temp("main-l-shape.txt", "3\n0 0 0\n4 0 0\n4 4 0\n");
    let file = path.to_str().unwrap();

    assert_eq!(run_main(&["steiner", file, "OT"]), (0, "8\n".to_string()));

    for bad in [
        vec!["steiner", file, "MST"],
        vec!["steiner", file, "ALL", "extra"],
        vec!["steiner"],
    ] {
        let (code, text) = run_main(&bad);
        assert_eq!(code, 1, "{bad:?}");
        assert!(text.starts_with("error: "), "{text}");
        assert!(!text.starts_with("error: error:"), "{text}");
        assert_eq!(text.lines().count(), 1, "{text}");
    }

    let (code, text) = run_main(&["steiner", "/nonexistent/instance.txt"]);
    assert_eq!(code, 1);
    assert!(text.starts_with("error: cannot read"), "{text}");

    std::fs::remove_file(path).unwrap();
}
