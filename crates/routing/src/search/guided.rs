use rand::rngs::StdRng;

use super::{Deadline, local_search};
use crate::arc_costs::ArcCosts;

const UTILITY_EPSILON: f64 = 1e-9;

/// Arc penalty counts. Symmetric problems share one counter per unordered pair
/// so the augmented cost stays symmetric.
struct Penalties {
    data: Vec<u32>,
    size: usize,
    symmetric: bool,
}

impl Penalties {
    fn new(size: usize, symmetric: bool) -> Self {
        Self {
            data: vec![0; size * size],
            size,
            symmetric,
        }
    }

    fn slot(&self, from: usize, to: usize) -> usize {
        if self.symmetric && from > to {
            to * self.size + from
        } else {
            from * self.size + to
        }
    }

    fn get(&self, from: usize, to: usize) -> u32 {
        self.data[self.slot(from, to)]
    }

    /// Bumps every arc of `seq` whose utility `cost / (1 + penalty)` is maximal.
    fn penalize_max_utility(&mut self, seq: &[usize], costs: &ArcCosts) {
        let utility = |from: usize, to: usize| {
            costs.get(from, to) as f64 / (1.0 + f64::from(self.get(from, to)))
        };

        let max = seq
            .windows(2)
            .map(|arc| utility(arc[0], arc[1]))
            .fold(f64::NEG_INFINITY, f64::max);
        let targets: Vec<usize> = seq
            .windows(2)
            .filter(|arc| utility(arc[0], arc[1]) >= max - UTILITY_EPSILON)
            .map(|arc| self.slot(arc[0], arc[1]))
            .collect();

        for slot in targets {
            self.data[slot] = self.data[slot].saturating_add(1);
        }
    }
}

/// Guided local search over `path` until the deadline; returns the cheapest
/// path seen under the real costs.
pub(crate) fn search(
    costs: &ArcCosts,
    mut current: Vec<usize>,
    lambda_coefficient: f64,
    deadline: &Deadline,
    rng: &mut StdRng,
) -> Vec<usize> {
    let symmetric = costs.is_symmetric();
    let plain = |from, to| costs.get(from, to) as f64;

    let finished = local_search::descend(&mut current, &plain, symmetric, deadline, rng);
    let mut best_cost = costs.path_cost(&current);
    let mut best = current.clone();

    if !finished || current.len() < 4 {
        return best;
    }

    let lambda = lambda_coefficient * best_cost as f64 / (current.len() - 1) as f64;
    if lambda <= 0.0 {
        log::debug!("routing.gls: zero-cost local minimum, nothing to guide");
        return best;
    }

    let mut penalties = Penalties::new(costs.size(), symmetric);
    let mut iterations = 0_usize;

    while !deadline.expired() {
        penalties.penalize_max_utility(&current, costs);

        let augmented =
            |from, to| costs.get(from, to) as f64 + lambda * f64::from(penalties.get(from, to));
        let finished = local_search::descend(&mut current, &augmented, symmetric, deadline, rng);
        iterations += 1;

        let cost = costs.path_cost(&current);
        if cost < best_cost {
            log::trace!("routing.gls: improved iteration={iterations} cost={cost}");
            best_cost = cost;
            best.clone_from(&current);
        }

        if !finished {
            break;
        }
    }

    log::debug!("routing.gls: done iterations={iterations} best_cost={best_cost} lambda={lambda:.3}");
    best
}
