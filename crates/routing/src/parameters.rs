use std::time::Duration;

const DEFAULT_LAMBDA_COEFFICIENT: f64 = 0.1;
const DEFAULT_RANDOM_SEED: u64 = 12_345;

/// How the first complete path is built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum FirstSolutionStrategy {
    /// Start at the vehicle start and repeatedly extend the path with the
    /// cheapest arc to an unvisited node.
    #[default]
    PathCheapestArc,
}

/// What happens after the first local minimum.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LocalSearchMetaheuristic {
    /// Stop at the first local minimum.
    #[default]
    GreedyDescent,
    /// Penalize high-utility arcs at each local minimum and keep searching
    /// until the time limit.
    GuidedLocalSearch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchParameters {
    pub first_solution_strategy: FirstSolutionStrategy,
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    /// Wall-clock budget for the whole solve. `None` means unbounded.
    pub time_limit: Option<Duration>,
    /// Scales penalties relative to the average arc cost of the first local minimum.
    pub guided_local_search_lambda_coefficient: f64,
    pub random_seed: u64,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::default(),
            local_search_metaheuristic: LocalSearchMetaheuristic::default(),
            time_limit: None,
            guided_local_search_lambda_coefficient: DEFAULT_LAMBDA_COEFFICIENT,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl SearchParameters {
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    pub fn with_local_search_metaheuristic(mut self, metaheuristic: LocalSearchMetaheuristic) -> Self {
        self.local_search_metaheuristic = metaheuristic;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }
}
