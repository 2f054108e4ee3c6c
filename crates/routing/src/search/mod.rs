//! Construction and improvement of the vehicle path.
//!
//! Paths are stored as full index sequences `[start, .., end]`; moves never
//! touch the two anchors.

mod construction;
mod guided;
mod local_search;

use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    FirstSolutionStrategy, LocalSearchMetaheuristic, SearchParameters, arc_costs::ArcCosts,
};

/// Absolute point in time after which the search stops.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Deadline(Option<Instant>);

impl Deadline {
    pub(crate) fn after(limit: Option<Duration>) -> Self {
        Self(limit.and_then(|limit| Instant::now().checked_add(limit)))
    }

    pub(crate) fn is_bounded(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

pub(crate) fn solve(
    costs: &ArcCosts,
    start: usize,
    end: usize,
    customers: &[usize],
    params: &SearchParameters,
    deadline: &Deadline,
) -> Option<Vec<usize>> {
    let mut path = match params.first_solution_strategy {
        FirstSolutionStrategy::PathCheapestArc => {
            construction::path_cheapest_arc(costs, start, end, customers, deadline)?
        }
    };
    log::debug!(
        "routing: first solution cost={} nodes={}",
        costs.path_cost(&path),
        customers.len()
    );

    let mut rng = StdRng::seed_from_u64(params.random_seed);
    let metaheuristic = match params.local_search_metaheuristic {
        LocalSearchMetaheuristic::GuidedLocalSearch if !deadline.is_bounded() => {
            log::warn!("routing: guided local search needs a time limit, using greedy descent");
            LocalSearchMetaheuristic::GreedyDescent
        }
        other => other,
    };

    match metaheuristic {
        LocalSearchMetaheuristic::GreedyDescent => {
            let weight = |from, to| costs.get(from, to) as f64;
            local_search::descend(&mut path, &weight, costs.is_symmetric(), deadline, &mut rng);
            Some(path)
        }
        LocalSearchMetaheuristic::GuidedLocalSearch => Some(guided::search(
            costs,
            path,
            params.guided_local_search_lambda_coefficient,
            deadline,
            &mut rng,
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Deadline;

    #[test]
    fn unbounded_deadline_never_expires() {
        let deadline = Deadline::after(None);
        assert!(!deadline.is_bounded());
        assert!(!deadline.expired());
    }

    #[test]
    fn zero_deadline_is_already_expired() {
        let deadline = Deadline::after(Some(Duration::ZERO));
        assert!(deadline.is_bounded());
        assert!(deadline.expired());
    }

    #[test]
    fn overflowing_limit_is_unbounded() {
        assert!(!Deadline::after(Some(Duration::MAX)).is_bounded());
    }
}
