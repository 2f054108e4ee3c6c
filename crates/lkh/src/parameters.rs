use std::{
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
};

use seriate_derive::LkhDisplay;

use crate::{LkhResult, spec_writer::SpecWriter};

/// LKH `INITIAL_TOUR_ALGORITHM` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, LkhDisplay)]
pub enum InitialTourAlgorithm {
    Boruvka,
    Greedy,
    NearestNeighbor,
    QuickBoruvka,
    Walk,
}

/// Subset of the LKH parameter file used for black-box solves.
///
/// Unset optional fields are left out of the file so LKH applies its own defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct LkhParameters {
    /// `PROBLEM_FILE`, mandatory.
    pub problem_file: PathBuf,
    /// `OUTPUT_TOUR_FILE`; the solver fills in a default next to the problem file.
    pub output_tour_file: Option<PathBuf>,
    /// `INITIAL_TOUR_ALGORITHM`.
    pub initial_tour_algorithm: Option<InitialTourAlgorithm>,
    /// `MAX_TRIALS` per run.
    pub max_trials: Option<usize>,
    /// `PRECISION`: LKH multiplies every explicit weight by this factor
    /// internally (default 100), so weights times precision must fit a C `int`.
    pub precision: Option<u32>,
    /// `RUNS`.
    pub runs: Option<usize>,
    /// `SEED`.
    pub seed: Option<u64>,
    /// `TIME_LIMIT` in seconds, covering the whole solve.
    pub time_limit: Option<f64>,
    /// `TRACE_LEVEL`.
    pub trace_level: Option<usize>,
}

impl LkhParameters {
    pub fn new(problem_file: impl Into<PathBuf>) -> Self {
        Self {
            problem_file: problem_file.into(),
            output_tour_file: None,
            initial_tour_algorithm: None,
            max_trials: None,
            precision: None,
            runs: None,
            seed: None,
            time_limit: None,
            trace_level: None,
        }
    }

    pub fn with_output_tour_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_tour_file = Some(path.into());
        self
    }

    pub fn with_initial_tour_algorithm(mut self, algorithm: InitialTourAlgorithm) -> Self {
        self.initial_tour_algorithm = Some(algorithm);
        self
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = Some(max_trials);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_trace_level(mut self, trace_level: usize) -> Self {
        self.trace_level = Some(trace_level);
        self
    }

    pub fn write_to_file(&self, path: &Path) -> LkhResult<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl Display for LkhParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut writer = SpecWriter::new(f);

        writer.kv_eq("PROBLEM_FILE", self.problem_file.display())?;
        writer.opt_kv_eq(
            "OUTPUT_TOUR_FILE",
            self.output_tour_file.as_ref().map(|p| p.display()),
        )?;
        writer.opt_kv_eq("INITIAL_TOUR_ALGORITHM", self.initial_tour_algorithm)?;
        writer.opt_kv_eq("MAX_TRIALS", self.max_trials)?;
        writer.opt_kv_eq("PRECISION", self.precision)?;
        writer.opt_kv_eq("RUNS", self.runs)?;
        writer.opt_kv_eq("SEED", self.seed)?;
        writer.opt_kv_eq("TIME_LIMIT", self.time_limit)?;
        writer.opt_kv_eq("TRACE_LEVEL", self.trace_level)?;

        writer.line("EOF")
    }
}

#[cfg(test)]
mod tests {
    use super::{InitialTourAlgorithm, LkhParameters};

    #[test]
    fn display_writes_only_assigned_keys() {
        let text = LkhParameters::new("work/problem.tsp").to_string();
        assert_eq!(text, "PROBLEM_FILE = work/problem.tsp\nEOF\n");
    }

    #[test]
    fn display_writes_assigned_keys_in_order() {
        let text = LkhParameters::new("work/problem.tsp")
            .with_output_tour_file("work/problem.tour")
            .with_initial_tour_algorithm(InitialTourAlgorithm::NearestNeighbor)
            .with_max_trials(100)
            .with_precision(1)
            .with_runs(1)
            .with_seed(7)
            .with_time_limit(1.5)
            .with_trace_level(0)
            .to_string();

        assert_eq!(
            text,
            "PROBLEM_FILE = work/problem.tsp\n\
             OUTPUT_TOUR_FILE = work/problem.tour\n\
             INITIAL_TOUR_ALGORITHM = NEAREST-NEIGHBOR\n\
             MAX_TRIALS = 100\n\
             PRECISION = 1\n\
             RUNS = 1\n\
             SEED = 7\n\
             TIME_LIMIT = 1.5\n\
             TRACE_LEVEL = 0\n\
             EOF\n"
        );
    }
}
