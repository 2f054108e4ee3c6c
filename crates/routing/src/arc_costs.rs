use rayon::prelude::*;

/// Dense row-major cost table over solver indices.
#[derive(Clone, Debug)]
pub(crate) struct ArcCosts {
    data: Vec<i64>,
    size: usize,
    symmetric: bool,
}

impl ArcCosts {
    /// Evaluates every arc once; rows are filled in parallel.
    pub(crate) fn build<F>(size: usize, evaluator: F) -> Self
    where
        F: Fn(usize, usize) -> i64 + Sync,
    {
        let mut data = vec![0_i64; size * size];
        if size > 0 {
            data.par_chunks_mut(size)
                .enumerate()
                .for_each(|(from, row)| {
                    for (to, cost) in row.iter_mut().enumerate() {
                        if from != to {
                            *cost = evaluator(from, to);
                        }
                    }
                });
        }

        let symmetric =
            (0..size).all(|i| (i + 1..size).all(|j| data[i * size + j] == data[j * size + i]));

        Self {
            data,
            size,
            symmetric,
        }
    }

    pub(crate) fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Sum of arc costs along `seq`.
    pub(crate) fn path_cost(&self, seq: &[usize]) -> i64 {
        seq.windows(2)
            .fold(0_i64, |acc, arc| acc.saturating_add(self.get(arc[0], arc[1])))
    }
}
