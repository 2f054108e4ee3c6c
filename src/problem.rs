use crate::{distance::DistanceMatrix, quantize::CostQuantizer};

/// Ordering for inputs too small to need a solver, or `None` when `n >= 2`.
pub fn trivial_ordering(n: usize) -> Option<Vec<usize>> {
    match n {
        0 => Some(Vec::new()),
        1 => Some(vec![0]),
        _ => None,
    }
}

/// Open-path seriation posed as a closed tour through a zero-cost dummy depot.
///
/// Nodes `0..n` are the elements; node `n` is the depot. Cutting the tour at
/// the depot leaves the shortest Hamiltonian path over the elements.
#[derive(Clone, Debug)]
pub struct SeriationProblem<'p, 'a> {
    distances: &'p DistanceMatrix<'a>,
    quantizer: CostQuantizer,
}

impl<'p, 'a> SeriationProblem<'p, 'a> {
    pub fn new(distances: &'p DistanceMatrix<'a>, quantizer: CostQuantizer) -> Self {
        Self {
            distances,
            quantizer,
        }
    }

    pub fn elements(&self) -> usize {
        self.distances.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.elements() + 1
    }

    pub fn depot(&self) -> usize {
        self.elements()
    }

    pub fn cost(&self, from: usize, to: usize) -> i64 {
        let depot = self.depot();
        if from == to || from == depot || to == depot {
            0
        } else {
            self.quantizer.quantize(self.distances.cost(from, to))
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.distances.is_symmetric()
    }

    /// Full `(n+1) x (n+1)` integer cost matrix, depot row and column last.
    pub fn cost_rows(&self) -> Vec<Vec<i64>> {
        let size = self.num_nodes();
        (0..size)
            .map(|from| (0..size).map(|to| self.cost(from, to)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{SeriationProblem, trivial_ordering};
    use crate::{distance::DistanceMatrix, quantize::CostQuantizer};

    #[test]
    fn trivial_sizes_bypass_the_solver() {
        assert_eq!(trivial_ordering(0), Some(vec![]));
        assert_eq!(trivial_ordering(1), Some(vec![0]));
        assert_eq!(trivial_ordering(2), None);
    }

    #[test]
    fn depot_is_free_in_both_directions() {
        let distances = DistanceMatrix::condensed(&[1.5, 2.25, 0.7505]).expect("condensed");
        let problem = SeriationProblem::new(&distances, CostQuantizer::default());

        assert_eq!(problem.num_nodes(), 4);
        assert_eq!(problem.depot(), 3);
        assert_eq!(problem.cost(0, 1), 1500);
        assert_eq!(problem.cost(2, 0), 2250);
        assert_eq!(problem.cost(1, 2), 750);
        for node in 0..4 {
            assert_eq!(problem.cost(node, 3), 0);
            assert_eq!(problem.cost(3, node), 0);
            assert_eq!(problem.cost(node, node), 0);
        }
    }

    fn cost_rows_of(dists: &[f64]) -> Vec<Vec<i64>> {
        let distances = DistanceMatrix::condensed(dists).expect("condensed");
        SeriationProblem::new(&distances, CostQuantizer::default()).cost_rows()
    }

    #[test]
    fn problem_borrows_a_local_matrix_over_caller_data() {
        let owned = vec![1.0, 2.0, 1.0];
        let rows = cost_rows_of(&owned);
        assert_eq!(rows[0], vec![0, 1000, 2000, 0]);
        assert_eq!(rows[3], vec![0, 0, 0, 0]);
    }

    #[test]
    fn cost_rows_include_depot_row_and_column() {
        let distances = DistanceMatrix::condensed(&[2.0]).expect("condensed");
        let problem = SeriationProblem::new(&distances, CostQuantizer::default());
        assert!(problem.is_symmetric());
        assert_eq!(
            problem.cost_rows(),
            vec![vec![0, 2000, 0], vec![2000, 0, 0], vec![0, 0, 0]]
        );
    }
}
