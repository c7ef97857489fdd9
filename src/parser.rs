// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Readers for the two line-oriented instance formats.
//!
//! Both formats start with a count `n` followed by `n` records, one per line:
//!
//! ```text
//! 3          3
//! 0 0 0      4 2
//! 4 0 0      1 1
//! 4 4 0      3 3
//! ```
//!
//! Steiner records (left) are `x y z` coordinates; floorplan records (right)
//! are `width height`. Blank lines are ignored anywhere. Anything after the
//! last record is rejected.

use crate::error::{Error, ParseError};
use crate::geometry::constants::{MAX_COORD, MAX_RECTANGLES, MAX_RECT_DIM, MAX_TERMINALS};
use crate::geometry::Point3;
use crate::instance::{FloorplanInstance, GridInstance};
use std::collections::HashMap;
use std::path::Path;

/// Parse the terminal locations of a Steiner instance.
///
/// # Examples
///
/// ```
/// use vlsi_exact::parser::parse_terminals;
/// use vlsi_exact::geometry::Point3;
///
/// let points = parse_terminals("2\n0 0 0\n4 6 0\n").unwrap();
/// assert_eq!(points, vec![Point3::new(0, 0, 0), Point3::new(4, 6, 0)]);
/// ```
pub fn parse_terminals(text: &str) -> Result<Vec<Point3>, ParseError> {
    let records = parse_records::<3>(text, 1, MAX_TERMINALS, 0, MAX_COORD)?;

    let mut first_seen: HashMap<Point3, usize> = HashMap::with_capacity(records.len());
    let mut points = Vec::with_capacity(records.len());
    for (line, [x, y, z]) in records {
        let p = Point3::new(x, y, z);
        if let Some(&first) = first_seen.get(&p) {
            return Err(ParseError::DuplicateTerminal { line, first });
        }
        first_seen.insert(p, line);
        points.push(p);
    }
    Ok(points)
}

/// Parse the `(width, height)` pairs of a floorplanning instance.
pub fn parse_rectangles(text: &str) -> Result<Vec<(u64, u64)>, ParseError> {
    let records = parse_records::<2>(text, 0, MAX_RECTANGLES, 1, MAX_RECT_DIM as i64)?;
    Ok(records
        .into_iter()
        .map(|(_, [w, h])| (w as u64, h as u64))
        .collect())
}

/// Read a Steiner instance file and build its Hanan grid, multiplying every
/// coordinate by `scale`.
pub fn read_grid_instance(path: &Path, scale: i64) -> Result<GridInstance, Error> {
    let text = read_to_string(path)?;
    let points = parse_terminals(&text)?;
    Ok(GridInstance::with_scale(&points, scale)?)
}

/// Read a floorplanning instance file.
pub fn read_floorplan_instance(path: &Path) -> Result<FloorplanInstance, Error> {
    let text = read_to_string(path)?;
    let dims = parse_rectangles(&text)?;
    Ok(FloorplanInstance::new(&dims))
}

fn read_to_string(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-blank lines with their 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parse a count line followed by `count` records of `K` integers each,
/// every value in `min..=max`.
fn parse_records<const K: usize>(
    text: &str,
    min_count: usize,
    max_count: usize,
    min: i64,
    max: i64,
) -> Result<Vec<(usize, [i64; K])>, ParseError> {
    let mut lines = content_lines(text);

    let (count_line, count_text) = lines.next().ok_or(ParseError::MissingCount)?;
    let count: usize = count_text.parse().map_err(|_| ParseError::InvalidCount {
        line: count_line,
        text: count_text.to_string(),
    })?;
    if count > max_count {
        return Err(ParseError::TooMany {
            line: count_line,
            count,
            max: max_count,
        });
    }
    if count < min_count {
        return Err(ParseError::TooFew {
            line: count_line,
            min: min_count,
        });
    }

    let mut records = Vec::with_capacity(count);
    for (line, content) in lines.by_ref().take(count) {
        records.push((line, parse_values::<K>(line, content, min, max)?));
    }
    if records.len() < count {
        return Err(ParseError::Truncated {
            expected: count,
            found: records.len(),
        });
    }
    if let Some((line, _)) = lines.next() {
        return Err(ParseError::TrailingData { line });
    }
    Ok(records)
}

fn parse_values<const K: usize>(
    line: usize,
    content: &str,
    min: i64,
    max: i64,
) -> Result<[i64; K], ParseError> {
    let malformed = || ParseError::MalformedLine {
        line,
        expected: K,
        text: content.to_string(),
    };

    let mut values = [0i64; K];
    let mut tokens = content.split_whitespace();
    for slot in values.iter_mut() {
        let token = tokens.next().ok_or_else(malformed)?;
        let value: i64 = token.parse().map_err(|_| malformed())?;
        if value < min || value > max {
            return Err(ParseError::OutOfRange {
                line,
                value,
                min,
                max,
            });
        }
        *slot = value;
    }
    if tokens.next().is_some() {
        return Err(malformed());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terminals() {
        let points = parse_terminals("3\n0 0 0\n4 0 0\n\n4 4 0\n").unwrap();
        assert_eq!(
            points,
            vec![
                Point3::new(0, 0, 0),
                Point3::new(4, 0, 0),
                Point3::new(4, 4, 0)
            ]
        );
    }

    #[test]
    fn test_rejects_duplicate_terminal() {
        let err = parse_terminals("3\n1 2 3\n4 5 6\n1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::DuplicateTerminal { line: 4, first: 2 }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_coordinate() {
        let err = parse_terminals("1\n0 -1 0\n").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { line: 2, value: -1, .. }));

        let text = format!("1\n0 {} 0\n", MAX_COORD + 1);
        assert!(matches!(
            parse_terminals(&text),
            Err(ParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_counts() {
        assert!(matches!(parse_terminals(""), Err(ParseError::MissingCount)));
        assert!(matches!(
            parse_terminals("x\n"),
            Err(ParseError::InvalidCount { line: 1, .. })
        ));
        assert!(matches!(
            parse_terminals("-3\n"),
            Err(ParseError::InvalidCount { .. })
        ));
        assert!(matches!(
            parse_terminals("0\n"),
            Err(ParseError::TooFew { .. })
        ));
        let text = format!("{}\n", MAX_TERMINALS + 1);
        assert!(matches!(
            parse_terminals(&text),
            Err(ParseError::TooMany { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_records() {
        assert!(matches!(
            parse_terminals("1\n1 2\n"),
            Err(ParseError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_terminals("1\n1 2 3 4\n"),
            Err(ParseError::MalformedLine { .. })
        ));
        assert!(matches!(
            parse_terminals("1\n1 a 3\n"),
            Err(ParseError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_truncated_and_trailing() {
        assert!(matches!(
            parse_terminals("2\n1 2 3\n"),
            Err(ParseError::Truncated {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            parse_terminals("1\n1 2 3\n4 5 6\n"),
            Err(ParseError::TrailingData { line: 3 })
        ));
    }

    #[test]
    fn test_parse_rectangles() {
        let dims = parse_rectangles("2\n3 4\n1 1\n").unwrap();
        assert_eq!(dims, vec![(3, 4), (1, 1)]);
        assert!(parse_rectangles("0\n").unwrap().is_empty());
    }

    #[test]
    fn test_rectangles_must_be_positive() {
        assert!(matches!(
            parse_rectangles("1\n0 4\n"),
            Err(ParseError::OutOfRange { value: 0, .. })
        ));
        let text = format!("{}\n", MAX_RECTANGLES + 1);
        assert!(matches!(
            parse_rectangles(&text),
            Err(ParseError::TooMany { .. })
        ));
    }

    #[test]
    fn test_duplicate_rectangles_are_allowed() {
        assert_eq!(parse_rectangles("2\n1 1\n1 1\n").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = read_floorplan_instance(Path::new("/nonexistent/instance.txt")).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Io { .. })));
    }
}
