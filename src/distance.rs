//! Read-only access to caller-owned distance data.
//!
//! Two layouts are accepted: condensed (the upper triangle of a symmetric
//! matrix, row-major, `i < j`) and square (`n x n`). Both are borrowed as
//! `ndarray` views; nothing is copied.

use ndarray::{ArrayView1, ArrayView2, ArrayViewD, Axis, Ix1, Ix2};

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Layout {
    Condensed,
    Square,
}

#[derive(Clone, Debug)]
enum Storage<'a> {
    Condensed(ArrayView1<'a, f64>),
    Square(ArrayView2<'a, f64>),
}

/// Validated distance data with a resolved element count.
#[derive(Clone, Debug)]
pub struct DistanceMatrix<'a> {
    storage: Storage<'a>,
    n: usize,
}

impl<'a> DistanceMatrix<'a> {
    /// Validates values, then resolves the layout and element count.
    pub fn new(dists: ArrayViewD<'a, f64>) -> Result<Self> {
        validate(&dists)?;
        Self::interpret(dists)
    }

    pub fn condensed(dists: &'a [f64]) -> Result<Self> {
        Self::new(ArrayView1::from(dists).into_dyn())
    }

    pub fn square(dists: ArrayView2<'a, f64>) -> Result<Self> {
        Self::new(dists.into_dyn())
    }

    /// Shape interpretation only; values must already be validated.
    pub(crate) fn interpret(dists: ArrayViewD<'a, f64>) -> Result<Self> {
        match dists.ndim() {
            1 => {
                let view = dists
                    .into_dimensionality::<Ix1>()
                    .map_err(|e| Error::malformed_shape(e.to_string()))?;
                Self::from_condensed(view)
            }
            2 => {
                let view = dists
                    .into_dimensionality::<Ix2>()
                    .map_err(|e| Error::malformed_shape(e.to_string()))?;
                let (rows, cols) = view.dim();
                if cols > 1 || rows == cols {
                    Self::from_square(view)
                } else if cols == 1 {
                    Self::from_condensed(view.index_axis_move(Axis(1), 0))
                } else {
                    Err(Error::malformed_shape(format!(
                        "expected a square matrix, got {rows}x{cols}"
                    )))
                }
            }
            rank => Err(Error::malformed_shape(format!(
                "expected a 1-D condensed or 2-D square matrix, got rank {rank}"
            ))),
        }
    }

    fn from_condensed(view: ArrayView1<'a, f64>) -> Result<Self> {
        let len = view.len();
        let n = element_count(len).ok_or_else(|| {
            Error::malformed_shape(format!(
                "condensed length {len} is not n*(n-1)/2 for any integer n"
            ))
        })?;
        Ok(Self {
            storage: Storage::Condensed(view),
            n,
        })
    }

    fn from_square(view: ArrayView2<'a, f64>) -> Result<Self> {
        let (rows, cols) = view.dim();
        if rows != cols {
            return Err(Error::malformed_shape(format!(
                "expected a square matrix, got {rows}x{cols}"
            )));
        }
        Ok(Self {
            storage: Storage::Square(view),
            n: rows,
        })
    }

    /// Number of elements being ordered.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn layout(&self) -> Layout {
        match self.storage {
            Storage::Condensed(_) => Layout::Condensed,
            Storage::Square(_) => Layout::Square,
        }
    }

    /// Distance from `i` to `j`; zero on the diagonal.
    pub fn cost(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        match &self.storage {
            Storage::Square(view) => view[[i, j]],
            Storage::Condensed(view) => {
                let (x, y) = if i > j { (i, j) } else { (j, i) };
                view[self.n * y - y * (y + 1) / 2 + x - y - 1]
            }
        }
    }

    /// Condensed data is symmetric by construction; square data is compared entrywise.
    pub fn is_symmetric(&self) -> bool {
        match &self.storage {
            Storage::Condensed(_) => true,
            Storage::Square(view) => {
                (0..self.n).all(|i| (i + 1..self.n).all(|j| view[[i, j]] == view[[j, i]]))
            }
        }
    }

    /// Sum of distances between consecutive elements of `ordering`.
    pub fn path_cost(&self, ordering: &[usize]) -> f64 {
        ordering.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }
}

/// Rejects infinite, NaN and negative entries, in that order of precedence.
pub fn validate(dists: &ArrayViewD<'_, f64>) -> Result<()> {
    let (mut inf, mut nan, mut negative) = (false, false, false);
    for &d in dists.iter() {
        if d.is_infinite() {
            inf = true;
        } else if d.is_nan() {
            nan = true;
        } else if d < 0.0 {
            negative = true;
        }
    }

    if inf {
        Err(Error::invalid_distance_value("Data contains inf values."))
    } else if nan {
        Err(Error::invalid_distance_value("Data contains NaN values."))
    } else if negative {
        Err(Error::invalid_distance_value(
            "Data contains negative values.",
        ))
    } else {
        Ok(())
    }
}

/// Solves `n*(n-1)/2 == len` for `n`, if an integer solution exists.
pub(crate) fn element_count(len: usize) -> Option<usize> {
    let disc = len.checked_mul(8)?.checked_add(1)?;
    let root = disc.isqrt();
    if root * root != disc {
        return None;
    }
    let n = (1 + root) / 2;
    (n * (n - 1) / 2 == len).then_some(n)
}
