use crate::{
    Error, Result,
    backend::SolverBackend,
    problem::SeriationProblem,
    retry::TimeBudget,
    tour::Tour,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FirstSolution {
    #[default]
    PathCheapestArc,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Metaheuristic {
    #[default]
    GuidedLocalSearch,
}

/// Search configuration handed to every backend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStrategy {
    pub first_solution: FirstSolution,
    pub metaheuristic: Metaheuristic,
    pub random_seed: u64,
}

impl SearchStrategy {
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }
}

/// Runs one budgeted solve and maps "no solution" to [`Error::SolverTimeout`].
pub struct SolverAdapter<'b> {
    backend: &'b dyn SolverBackend,
    strategy: SearchStrategy,
}

impl<'b> SolverAdapter<'b> {
    pub fn new(backend: &'b dyn SolverBackend, strategy: SearchStrategy) -> Self {
        Self { backend, strategy }
    }

    pub fn invoke(&self, problem: &SeriationProblem<'_, '_>, budget: TimeBudget) -> Result<Tour> {
        log::debug!(
            "solver: backend={} nodes={} budget_ms={}",
            self.backend.capability().kind,
            problem.num_nodes(),
            budget.millis()
        );
        match self.backend.solve(problem, &self.strategy, budget)? {
            Some(tour) => Ok(tour),
            None => Err(Error::SolverTimeout {
                budget_ms: budget.millis(),
            }),
        }
    }
}
