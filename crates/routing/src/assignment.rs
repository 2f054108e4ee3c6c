/// Solution returned by a successful solve.
///
/// `next(index)` gives the successor of a solver index on the vehicle path;
/// the end index is its own successor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    next: Vec<usize>,
    objective: i64,
}

impl Assignment {
    pub(crate) fn from_path(num_indices: usize, path: &[usize], objective: i64) -> Self {
        let mut next: Vec<usize> = (0..num_indices).collect();
        for arc in path.windows(2) {
            next[arc[0]] = arc[1];
        }
        Self { next, objective }
    }

    pub fn next(&self, index: usize) -> usize {
        self.next[index]
    }

    /// Total arc cost of the path.
    pub fn objective_value(&self) -> i64 {
        self.objective
    }
}
