use std::{
    path::{self, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use lkh::{
    parameters::{InitialTourAlgorithm, LkhParameters},
    problem::{TsplibProblem, TsplibProblemType},
    process::LkhProcess,
    solver::LkhSolver,
};
use seriate_derive::timer;

use super::{BackendKind, Capability, NodeIndexing, SolverBackend, StrategySupport};
use crate::{
    Error, Result,
    adapter::{FirstSolution, SearchStrategy},
    file_cleanup::ScopedWorkDir,
    options::SeriateOptions,
    problem::SeriationProblem,
    retry::TimeBudget,
    tour::Tour,
};

const PROBLEM_NAME: &str = "seriation";
const PROBLEM_FILE: &str = "seriation.tsp";
const RUNS: usize = 1;
const MIN_MAX_TRIALS: usize = 100;
const TRACE_LEVEL: usize = 0;
/// Weights are used as given; LKH's default would scale them by 100.
const PRECISION: u32 = 1;
/// Largest weight LKH can hold in its C `int` arithmetic with room for its own scaling.
const MAX_LKH_WEIGHT: i64 = i32::MAX as i64 / 100;

static SOLVE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Backend driving an external LKH executable through TSPLIB files.
#[derive(Clone, Debug)]
pub struct LkhBackend {
    process: LkhProcess,
    work_dir: PathBuf,
    cleanup: bool,
}

impl LkhBackend {
    /// Fails with [`Error::UnsupportedSolver`] unless `lkh_exe` points at a file.
    pub fn from_options(options: &SeriateOptions) -> Result<Self> {
        let Some(exe) = &options.lkh_exe else {
            return Err(Error::unsupported_solver(
                "the lkh backend needs --lkh-exe <path>",
            ));
        };
        let process = LkhProcess::new(exe);
        if !process.is_available() {
            return Err(Error::unsupported_solver(format!(
                "LKH executable not found at {}",
                exe.display()
            )));
        }

        Ok(Self {
            process,
            work_dir: path::absolute(&options.work_dir)?,
            cleanup: options.cleanup,
        })
    }

    fn next_work_dir(&self) -> PathBuf {
        let solve_no = SOLVE_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.work_dir.join(format!("solve-{solve_no}"))
    }
}

/// LKH has no cheapest-arc construction and always improves with its own
/// k-opt moves; the capability reports this as a substituted strategy.
fn initial_tour_algorithm(first_solution: FirstSolution) -> InitialTourAlgorithm {
    match first_solution {
        FirstSolution::PathCheapestArc => InitialTourAlgorithm::NearestNeighbor,
    }
}

fn problem_type(problem: &SeriationProblem<'_, '_>) -> TsplibProblemType {
    if problem.is_symmetric() {
        TsplibProblemType::Tsp
    } else {
        TsplibProblemType::Atsp
    }
}

fn check_weight_range(rows: &[Vec<i64>]) -> Result<()> {
    let max = rows.iter().flatten().copied().max().unwrap_or(0);
    if max > MAX_LKH_WEIGHT {
        return Err(Error::invalid_argument(format!(
            "arc cost {max} exceeds the LKH weight limit {MAX_LKH_WEIGHT}; \
             lower the approximation multiplier or use the native backend"
        )));
    }
    Ok(())
}

/// Rotates an LKH cycle so it starts at the depot, then closes it there.
fn anchor_at_depot(cycle: Vec<usize>, depot: usize) -> Result<Tour> {
    let start = cycle
        .iter()
        .position(|&node| node == depot)
        .ok_or_else(|| Error::invalid_tour("LKH tour does not visit the depot"))?;

    let mut nodes = Vec::with_capacity(cycle.len() + 1);
    nodes.extend_from_slice(&cycle[start..]);
    nodes.extend_from_slice(&cycle[..start]);
    nodes.push(depot);
    Ok(Tour::new(nodes))
}

impl SolverBackend for LkhBackend {
    fn capability(&self) -> Capability {
        Capability {
            kind: BackendKind::Lkh,
            version: self.process.exe_path().display().to_string(),
            node_indexing: NodeIndexing::TsplibIds,
            strategy: StrategySupport::Substituted,
        }
    }

    #[timer("lkh")]
    fn solve(
        &self,
        problem: &SeriationProblem<'_, '_>,
        strategy: &SearchStrategy,
        budget: TimeBudget,
    ) -> Result<Option<Tour>> {
        let rows = problem.cost_rows();
        check_weight_range(&rows)?;

        // TIME_LIMIT only bounds the improvement phase, so LKH always builds an
        // initial tour. A zero budget therefore cannot be honored.
        if budget.millis() == 0 {
            return Ok(None);
        }

        let work_dir = ScopedWorkDir::create(self.next_work_dir(), self.cleanup)?;
        let tsplib = TsplibProblem::from_full_matrix(PROBLEM_NAME, problem_type(problem), rows)?
            .with_comment(format!("{} elements plus dummy depot", problem.elements()));
        let params = LkhParameters::new(work_dir.path().join(PROBLEM_FILE))
            .with_initial_tour_algorithm(initial_tour_algorithm(strategy.first_solution))
            .with_runs(RUNS)
            .with_max_trials(problem.num_nodes().max(MIN_MAX_TRIALS))
            .with_precision(PRECISION)
            .with_seed(strategy.random_seed)
            .with_time_limit(budget.duration().as_secs_f64())
            .with_trace_level(TRACE_LEVEL);

        log::debug!(
            "lkh: workdir={} type={} dimension={}",
            work_dir.path().display(),
            tsplib.problem_type,
            tsplib.dimension
        );

        let Some(tour) = LkhSolver::new(tsplib, params).run(self.process.clone())? else {
            return Ok(None);
        };
        anchor_at_depot(tour.zero_based_tour(), problem.depot()).map(Some)
    }
}
