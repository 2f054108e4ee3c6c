use routing::{
    FirstSolutionStrategy, LocalSearchMetaheuristic, RoutingIndexManager, RoutingModel,
    SearchParameters,
};
use seriate_derive::timer;

use super::{BackendKind, Capability, NodeIndexing, SolverBackend, StrategySupport};
use crate::{
    Result,
    adapter::{FirstSolution, Metaheuristic, SearchStrategy},
    problem::SeriationProblem,
    retry::TimeBudget,
    tour::Tour,
};

const NUM_VEHICLES: usize = 1;
const VEHICLE: usize = 0;

/// In-process backend built on the `routing` engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }
}

fn search_parameters(strategy: &SearchStrategy, budget: TimeBudget) -> SearchParameters {
    let first_solution = match strategy.first_solution {
        FirstSolution::PathCheapestArc => FirstSolutionStrategy::PathCheapestArc,
    };
    let metaheuristic = match strategy.metaheuristic {
        Metaheuristic::GuidedLocalSearch => LocalSearchMetaheuristic::GuidedLocalSearch,
    };

    SearchParameters::default()
        .with_first_solution_strategy(first_solution)
        .with_local_search_metaheuristic(metaheuristic)
        .with_time_limit(budget.duration())
        .with_random_seed(strategy.random_seed)
}

impl SolverBackend for NativeBackend {
    fn capability(&self) -> Capability {
        Capability {
            kind: BackendKind::Native,
            version: routing::VERSION.to_string(),
            node_indexing: NodeIndexing::IndexManager,
            strategy: StrategySupport::Honored,
        }
    }

    #[timer("native")]
    fn solve(
        &self,
        problem: &SeriationProblem<'_, '_>,
        strategy: &SearchStrategy,
        budget: TimeBudget,
    ) -> Result<Option<Tour>> {
        let manager = RoutingIndexManager::new(problem.num_nodes(), NUM_VEHICLES, problem.depot())?;
        let mut model = RoutingModel::new(&manager);

        let transit = model.register_transit_callback(|from_index, to_index| {
            problem.cost(
                manager.index_to_node(from_index),
                manager.index_to_node(to_index),
            )
        });
        model.set_arc_cost_evaluator_of_all_vehicles(transit)?;

        let params = search_parameters(strategy, budget);
        let Some(assignment) = model.solve_with_parameters(&params) else {
            return Ok(None);
        };

        let mut nodes = Vec::with_capacity(problem.num_nodes() + 1);
        let mut index = model.start(VEHICLE);
        while !model.is_end(index) {
            nodes.push(manager.index_to_node(index));
            index = assignment.next(index);
        }
        nodes.push(manager.index_to_node(index));

        log::debug!(
            "native: objective={} nodes={}",
            assignment.objective_value(),
            nodes.len()
        );
        Ok(Some(Tour::new(nodes)))
    }
}

#[cfg(test)]
mod tests {
    use super::NativeBackend;
    use crate::{
        adapter::SearchStrategy, backend::SolverBackend, distance::DistanceMatrix,
        problem::SeriationProblem, quantize::CostQuantizer, retry::TimeBudget, tour,
    };

    #[test]
    fn solve_returns_depot_anchored_tour() {
        let distances = DistanceMatrix::condensed(&[1.0, 2.0, 1.0]).expect("condensed");
        let problem = SeriationProblem::new(&distances, CostQuantizer::default());

        let tour = NativeBackend::new()
            .solve(&problem, &SearchStrategy::default(), TimeBudget::from_millis(100))
            .expect("solve")
            .expect("tour within budget");

        assert_eq!(tour.nodes().first(), Some(&3));
        assert_eq!(tour.nodes().last(), Some(&3));
        let ordering = tour::decode(&tour, problem.depot()).expect("permutation");
        assert_eq!(distances.path_cost(&ordering), 2.0);
    }

    #[test]
    fn zero_budget_yields_no_tour() {
        let distances = DistanceMatrix::condensed(&[1.0, 2.0, 1.0]).expect("condensed");
        let problem = SeriationProblem::new(&distances, CostQuantizer::default());

        let tour = NativeBackend::new()
            .solve(&problem, &SearchStrategy::default(), TimeBudget::from_millis(0))
            .expect("solve");
        assert!(tour.is_none());
    }
}
