use crate::{
    Assignment, RoutingError, RoutingIndexManager, RoutingResult, SearchParameters,
    arc_costs::ArcCosts,
    search::{self, Deadline},
};

type TransitCallback<'m> = Box<dyn Fn(usize, usize) -> i64 + Send + Sync + 'm>;

/// Single-vehicle routing model over the index space of a [`RoutingIndexManager`].
pub struct RoutingModel<'m> {
    manager: &'m RoutingIndexManager,
    callbacks: Vec<TransitCallback<'m>>,
    arc_cost_evaluator: Option<usize>,
}

impl<'m> RoutingModel<'m> {
    pub fn new(manager: &'m RoutingIndexManager) -> Self {
        Self {
            manager,
            callbacks: Vec::new(),
            arc_cost_evaluator: None,
        }
    }

    /// Registers a callback receiving solver indices and returns its id.
    pub fn register_transit_callback<F>(&mut self, callback: F) -> usize
    where
        F: Fn(usize, usize) -> i64 + Send + Sync + 'm,
    {
        self.callbacks.push(Box::new(callback));
        self.callbacks.len() - 1
    }

    pub fn set_arc_cost_evaluator_of_all_vehicles(&mut self, callback: usize) -> RoutingResult<()> {
        if callback >= self.callbacks.len() {
            return Err(RoutingError::UnknownCallback(callback));
        }
        self.arc_cost_evaluator = Some(callback);
        Ok(())
    }

    pub fn start(&self, _vehicle: usize) -> usize {
        self.manager.start_index()
    }

    pub fn end(&self, _vehicle: usize) -> usize {
        self.manager.end_index()
    }

    pub fn is_end(&self, index: usize) -> bool {
        index == self.manager.end_index()
    }

    /// Returns `None` when the time limit passes before a complete path exists.
    pub fn solve_with_parameters(&self, params: &SearchParameters) -> Option<Assignment> {
        let deadline = Deadline::after(params.time_limit);
        if deadline.expired() {
            log::debug!("routing: time limit reached before construction");
            return None;
        }

        let num_indices = self.manager.num_indices();
        let costs = match self.arc_cost_evaluator.map(|id| &self.callbacks[id]) {
            Some(evaluator) => ArcCosts::build(num_indices, |from, to| evaluator(from, to).max(0)),
            None => ArcCosts::build(num_indices, |_, _| 0),
        };

        let start = self.manager.start_index();
        let end = self.manager.end_index();
        let customers: Vec<usize> = (0..start).collect();

        log::debug!(
            "routing: solve nodes={} symmetric={} metaheuristic={:?} time_limit={:?}",
            self.manager.num_nodes(),
            costs.is_symmetric(),
            params.local_search_metaheuristic,
            params.time_limit
        );

        let path = search::solve(&costs, start, end, &customers, params, &deadline)?;
        let objective = costs.path_cost(&path);
        Some(Assignment::from_path(num_indices, &path, objective))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::RoutingModel;
    use crate::{LocalSearchMetaheuristic, RoutingError, RoutingIndexManager, SearchParameters};

    fn walk(model: &RoutingModel<'_>, assignment: &crate::Assignment) -> Vec<usize> {
        let mut index = model.start(0);
        let mut visited = Vec::new();
        while !model.is_end(index) {
            visited.push(index);
            index = assignment.next(index);
        }
        visited
    }

    #[test]
    fn zero_time_limit_yields_no_assignment() {
        let manager = RoutingIndexManager::new(3, 1, 2).expect("manager");
        let model = RoutingModel::new(&manager);
        let params = SearchParameters::default().with_time_limit(Duration::ZERO);

        assert!(model.solve_with_parameters(&params).is_none());
    }

    #[test]
    fn unknown_callback_is_rejected() {
        let manager = RoutingIndexManager::new(3, 1, 2).expect("manager");
        let mut model = RoutingModel::new(&manager);
        assert_eq!(
            model.set_arc_cost_evaluator_of_all_vehicles(4),
            Err(RoutingError::UnknownCallback(4))
        );
    }

    #[test]
    fn greedy_descent_visits_every_node_once() {
        let positions = [7.0_f64, 1.0, 4.0, 9.0, 2.0, 5.0];
        let depot = positions.len();
        let manager = RoutingIndexManager::new(depot + 1, 1, depot).expect("manager");
        let mut model = RoutingModel::new(&manager);
        let transit = model.register_transit_callback(|from, to| {
            let (a, b) = (manager.index_to_node(from), manager.index_to_node(to));
            if a == depot || b == depot {
                0
            } else {
                ((positions[a] - positions[b]).abs() * 10.0) as i64
            }
        });
        model
            .set_arc_cost_evaluator_of_all_vehicles(transit)
            .expect("callback");

        let params = SearchParameters::default()
            .with_local_search_metaheuristic(LocalSearchMetaheuristic::GreedyDescent)
            .with_time_limit(Duration::from_secs(5));
        let assignment = model.solve_with_parameters(&params).expect("assignment");

        let visited = walk(&model, &assignment);
        assert_eq!(visited[0], model.start(0));
        let nodes: Vec<usize> = visited[1..]
            .iter()
            .map(|&i| manager.index_to_node(i))
            .collect();
        let mut sorted = nodes.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);

        let walked: i64 = nodes
            .windows(2)
            .map(|w| ((positions[w[0]] - positions[w[1]]).abs() * 10.0) as i64)
            .sum();
        assert_eq!(assignment.objective_value(), walked);
        // Any open path over these positions spans at least 9 - 1 = 8, scaled by 10.
        assert!(walked >= 80);
    }

    #[test]
    fn guided_local_search_finds_line_order() {
        let positions = [3.0_f64, 0.0, 8.0, 1.0, 6.0, 2.0, 7.0];
        let depot = positions.len();
        let manager = RoutingIndexManager::new(depot + 1, 1, depot).expect("manager");
        let mut model = RoutingModel::new(&manager);
        let transit = model.register_transit_callback(|from, to| {
            let (a, b) = (manager.index_to_node(from), manager.index_to_node(to));
            if a == depot || b == depot {
                0
            } else {
                ((positions[a] - positions[b]).abs() * 1000.0) as i64
            }
        });
        model
            .set_arc_cost_evaluator_of_all_vehicles(transit)
            .expect("callback");

        let params = SearchParameters::default()
            .with_local_search_metaheuristic(LocalSearchMetaheuristic::GuidedLocalSearch)
            .with_time_limit(Duration::from_millis(200));
        let assignment = model.solve_with_parameters(&params).expect("assignment");

        assert_eq!(assignment.objective_value(), 8_000);
    }
}
