//! Text format read by the `seriate` binary.
//!
//! A single non-empty line holds condensed distances. Several lines are the
//! rows of a square matrix. A one-line file is therefore never a 1x1 matrix:
//! `0` is one pair of identical elements and orders to `0 1`. Values are separated by whitespace and/or commas;
//! lines starting with `#` are ignored.

use std::{fs, io::Read, path::Path};

use ndarray::{Array1, Array2, ArrayD};

use crate::{Error, Result};

pub fn read_distances(path: &str) -> Result<ArrayD<f64>> {
    let text = if path.is_empty() {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(Path::new(path))?
    };
    parse_distances(&text)
}

pub fn parse_distances(text: &str) -> Result<ArrayD<f64>> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        rows.push(parse_row(line_no + 1, line)?);
    }

    if rows.len() <= 1 {
        let values = rows.pop().unwrap_or_default();
        return Ok(Array1::from(values).into_dyn());
    }

    let width = rows[0].len();
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(Error::malformed_shape(format!(
            "row {} has {} values, expected {width}",
            idx + 1,
            row.len()
        )));
    }

    let height = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((height, width), flat)
        .map(|array| array.into_dyn())
        .map_err(|e| Error::malformed_shape(e.to_string()))
}

fn parse_row(line_no: usize, line: &str) -> Result<Vec<f64>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>().map_err(|e| {
                Error::invalid_argument(format!("line {line_no}: bad distance '{tok}': {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_distances;
    use crate::Error;

    #[test]
    fn single_line_is_condensed() {
        let dists = parse_distances("1, 2 3\n").expect("parse");
        assert_eq!(dists.shape(), &[3]);
        assert_eq!(dists.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn single_value_is_one_condensed_pair() {
        let dists = parse_distances("0\n").expect("parse");
        assert_eq!(dists.shape(), &[1]);

        let options = crate::SeriateOptions::default().with_timeout(0.3);
        let order = crate::seriate(dists.view(), &options).expect("seriate");
        assert_eq!(order.len(), 2);
        assert!(crate::CliOptions::usage().contains("A single line is always condensed"));
    }

    #[test]
    fn several_lines_are_square_rows() {
        let dists = parse_distances("# two points\n0 1.5\n1.5 0\n").expect("parse");
        assert_eq!(dists.shape(), &[2, 2]);
        assert_eq!(dists[[0, 1]], 1.5);
    }

    #[test]
    fn empty_input_is_empty_condensed() {
        let dists = parse_distances("\n\n").expect("parse");
        assert_eq!(dists.shape(), &[0]);
    }

    #[test]
    fn special_values_parse_and_are_left_to_validation() {
        let dists = parse_distances("inf NaN -1").expect("parse");
        assert!(dists.iter().any(|d| d.is_infinite()));
        assert!(dists.iter().any(|d| d.is_nan()));
    }

    #[test]
    fn ragged_rows_and_bad_tokens_are_rejected() {
        let err = parse_distances("0 1\n1\n").expect_err("ragged");
        assert!(matches!(err, Error::MalformedDistanceShape(_)));

        let err = parse_distances("0 x\n").expect_err("token");
        assert!(err.to_string().contains("line 1: bad distance 'x'"));
    }
}
