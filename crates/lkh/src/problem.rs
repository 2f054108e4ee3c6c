use std::{
    fmt::{Display, Formatter},
    fs,
    path::Path,
};

use seriate_derive::LkhDisplay;

use crate::{LkhError, LkhResult, spec_writer::SpecWriter};

/// TSPLIB `TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, LkhDisplay)]
pub enum TsplibProblemType {
    Tsp,
    Atsp,
}

/// TSPLIB `EDGE_WEIGHT_TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, LkhDisplay)]
pub enum EdgeWeightType {
    Explicit,
}

/// TSPLIB `EDGE_WEIGHT_FORMAT` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, LkhDisplay)]
#[lkh(separator = "_")]
pub enum EdgeWeightFormat {
    FullMatrix,
}

/// TSPLIB problem with explicit integer edge weights.
#[derive(Clone, Debug, PartialEq)]
pub struct TsplibProblem {
    pub name: String,
    pub problem_type: TsplibProblemType,
    pub comment_lines: Vec<String>,
    pub dimension: usize,
    pub edge_weight_type: EdgeWeightType,
    pub edge_weight_format: EdgeWeightFormat,
    pub edge_weight_section: Vec<Vec<i64>>,
}

impl TsplibProblem {
    /// Builds a `FULL_MATRIX` problem. The caller states whether the weights
    /// are symmetric through `problem_type`; LKH reads only the upper triangle
    /// of a `TSP` matrix.
    pub fn from_full_matrix(
        name: impl Into<String>,
        problem_type: TsplibProblemType,
        rows: Vec<Vec<i64>>,
    ) -> LkhResult<Self> {
        let dimension = rows.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dimension) {
            return Err(LkhError::invalid_input(format!(
                "row {idx} has {} weights, expected {dimension}",
                row.len()
            )));
        }

        Ok(Self {
            name: name.into(),
            problem_type,
            comment_lines: Vec::new(),
            dimension,
            edge_weight_type: EdgeWeightType::Explicit,
            edge_weight_format: EdgeWeightFormat::FullMatrix,
            edge_weight_section: rows,
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment_lines.push(comment.into());
        self
    }

    pub fn write_to_file(&self, path: &Path) -> LkhResult<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl Display for TsplibProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut writer = SpecWriter::new(f);

        writer.kv_colon("NAME", &self.name)?;
        writer.kv_colon("TYPE", self.problem_type)?;
        for comment in &self.comment_lines {
            writer.kv_colon("COMMENT", comment)?;
        }
        writer.kv_colon("DIMENSION", self.dimension)?;
        writer.kv_colon("EDGE_WEIGHT_TYPE", self.edge_weight_type)?;
        writer.kv_colon("EDGE_WEIGHT_FORMAT", self.edge_weight_format)?;

        writer.line("EDGE_WEIGHT_SECTION")?;
        for row in &self.edge_weight_section {
            writer.row(row)?;
        }

        writer.line("EOF")
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeWeightFormat, TsplibProblem, TsplibProblemType};

    #[test]
    fn symmetric_matrix_is_emitted_as_tsp() {
        let problem = TsplibProblem::from_full_matrix(
            "sample",
            TsplibProblemType::Tsp,
            vec![vec![0, 7, 3], vec![7, 0, 5], vec![3, 5, 0]],
        )
        .expect("square matrix");

        assert_eq!(problem.problem_type, TsplibProblemType::Tsp);
        assert_eq!(problem.dimension, 3);

        let text = problem.with_comment("seriation").to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NAME: sample");
        assert_eq!(lines[1], "TYPE: TSP");
        assert_eq!(lines[2], "COMMENT: seriation");
        assert_eq!(lines[3], "DIMENSION: 3");
        assert_eq!(lines[4], "EDGE_WEIGHT_TYPE: EXPLICIT");
        assert_eq!(lines[5], "EDGE_WEIGHT_FORMAT: FULL_MATRIX");
        assert!(text.contains("EDGE_WEIGHT_SECTION\n0 7 3\n7 0 5\n3 5 0\nEOF\n"));
    }

    #[test]
    fn asymmetric_matrix_is_emitted_as_atsp() {
        let problem = TsplibProblem::from_full_matrix(
            "a",
            TsplibProblemType::Atsp,
            vec![vec![0, 1], vec![2, 0]],
        )
        .expect("square matrix");
        assert_eq!(problem.problem_type, TsplibProblemType::Atsp);
        assert_eq!(problem.edge_weight_format, EdgeWeightFormat::FullMatrix);
        assert!(problem.to_string().contains("TYPE: ATSP"));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TsplibProblem::from_full_matrix(
            "bad",
            TsplibProblemType::Tsp,
            vec![vec![0, 1], vec![1]],
        )
        .expect_err("ragged matrix should fail");
        assert!(err.to_string().contains("row 1 has 1 weights, expected 2"));
    }

    #[test]
    fn declared_type_is_written_even_for_symmetric_weights() {
        let problem = TsplibProblem::from_full_matrix(
            "declared",
            TsplibProblemType::Atsp,
            vec![vec![0, 4], vec![4, 0]],
        )
        .expect("square matrix");
        assert_eq!(problem.problem_type, TsplibProblemType::Atsp);
        assert!(problem.to_string().contains("TYPE: ATSP"));
    }
}
