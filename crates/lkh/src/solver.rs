use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    LkhResult, parameters::LkhParameters, problem::TsplibProblem, process::LkhProcess,
    tour::TsplibTour,
};

const DEFAULT_TOUR_FILE: &str = "problem.tour";
const DEFAULT_PARAMS_FILE: &str = "problem.par";

/// One LKH solve: writes the problem and parameter files, runs LKH, reads the tour back.
#[derive(Clone, Debug)]
pub struct LkhSolver {
    workdir: PathBuf,
    problem: TsplibProblem,
    params: LkhParameters,
}

impl LkhSolver {
    pub fn new(problem: TsplibProblem, mut params: LkhParameters) -> Self {
        let workdir = derive_workdir(&params.problem_file);
        if params.output_tour_file.is_none() {
            params.output_tour_file = Some(workdir.join(DEFAULT_TOUR_FILE));
        }

        Self {
            workdir,
            problem,
            params,
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn params(&self) -> &LkhParameters {
        &self.params
    }

    /// Returns `Ok(None)` when LKH exits cleanly without writing a tour.
    pub fn run(&self, process: LkhProcess) -> LkhResult<Option<TsplibTour>> {
        let param_file = self.workdir.join(DEFAULT_PARAMS_FILE);
        let tour_file = self
            .params
            .output_tour_file
            .clone()
            .unwrap_or_else(|| self.workdir.join(DEFAULT_TOUR_FILE));

        fs::create_dir_all(&self.workdir)?;
        if tour_file.exists() {
            fs::remove_file(&tour_file)?;
        }

        self.problem.write_to_file(&self.params.problem_file)?;
        self.params.write_to_file(&param_file)?;

        process.with_current_dir(&self.workdir).run(&param_file)?;

        if !tour_file.exists() {
            log::debug!("lkh.solver: no tour written to {}", tour_file.display());
            return Ok(None);
        }
        TsplibTour::from_file(&tour_file).map(Some)
    }
}

fn derive_workdir(problem_file: &Path) -> PathBuf {
    match problem_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{LkhSolver, derive_workdir};
    use crate::{
        parameters::LkhParameters,
        problem::{TsplibProblem, TsplibProblemType},
    };

    #[test]
    fn derive_workdir_defaults_to_current_directory_marker() {
        assert_eq!(
            derive_workdir(PathBuf::from("problem.tsp").as_path()),
            PathBuf::from(".")
        );
        assert_eq!(
            derive_workdir(PathBuf::from("a/problem.tsp").as_path()),
            PathBuf::from("a")
        );
    }

    #[test]
    fn new_places_default_tour_next_to_problem_file() {
        let problem = TsplibProblem::from_full_matrix("p", TsplibProblemType::Tsp, vec![vec![0]])
            .expect("problem");
        let solver = LkhSolver::new(problem, LkhParameters::new("work/problem.tsp"));

        assert_eq!(solver.workdir(), PathBuf::from("work").as_path());
        assert_eq!(
            solver.params().output_tour_file,
            Some(PathBuf::from("work/problem.tour"))
        );
    }

    #[test]
    fn new_keeps_explicit_tour_file() {
        let problem = TsplibProblem::from_full_matrix("p", TsplibProblemType::Tsp, vec![vec![0]])
            .expect("problem");
        let params = LkhParameters::new("work/problem.tsp").with_output_tour_file("out/run.tour");
        let solver = LkhSolver::new(problem, params);

        assert_eq!(
            solver.params().output_tour_file,
            Some(PathBuf::from("out/run.tour"))
        );
    }
}
