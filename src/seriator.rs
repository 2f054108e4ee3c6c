use ndarray::ArrayViewD;
use seriate_derive::timer;

use crate::{
    Result,
    adapter::{SearchStrategy, SolverAdapter},
    backend::{self, Capability, SolverBackend},
    distance::{self, DistanceMatrix},
    options::SeriateOptions,
    problem::{self, SeriationProblem},
    quantize::CostQuantizer,
    retry::{RetryController, Timeout},
    tour,
};

/// Orders elements so that the summed distance between neighbours is minimal.
///
/// The backend is negotiated once in [`Seriator::initialize`] and reused by
/// every [`Seriator::seriate`] call. Calls share no mutable state.
pub struct Seriator {
    backend: Box<dyn SolverBackend>,
    options: SeriateOptions,
}

impl Seriator {
    pub fn initialize(options: &SeriateOptions) -> Result<Self> {
        let backend = backend::negotiate(options)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Uses `backend` as is, skipping negotiation.
    pub fn with_backend(backend: Box<dyn SolverBackend>, options: &SeriateOptions) -> Self {
        Self {
            backend,
            options: options.clone(),
        }
    }

    pub fn capability(&self) -> Capability {
        self.backend.capability()
    }

    pub fn options(&self) -> &SeriateOptions {
        &self.options
    }

    /// Returns a permutation of the elements described by `dists`.
    ///
    /// `dists` is either condensed (1-D) or square (2-D). Values are checked
    /// first, then options, then shape; no solver work happens until all
    /// three pass.
    #[timer("seriate")]
    pub fn seriate(&self, dists: ArrayViewD<'_, f64>) -> Result<Vec<usize>> {
        distance::validate(&dists)?;
        let timeout = Timeout::from_secs(self.options.timeout)?;
        let quantizer = CostQuantizer::new(self.options.approximation_multiplier)?;
        let distances = DistanceMatrix::interpret(dists)?;

        if let Some(ordering) = problem::trivial_ordering(distances.len()) {
            log::debug!("seriate: trivial n={}", distances.len());
            return Ok(ordering);
        }

        let problem = SeriationProblem::new(&distances, quantizer);
        let strategy = SearchStrategy::default().with_random_seed(self.options.random_seed);
        let adapter = SolverAdapter::new(self.backend.as_ref(), strategy);

        let tour = RetryController::new(timeout).run(|budget| adapter.invoke(&problem, budget))?;
        let ordering = tour::decode(&tour, problem.depot())?;

        log::debug!(
            "seriate: n={} layout={:?} cost={:.4}",
            ordering.len(),
            distances.layout(),
            distances.path_cost(&ordering)
        );
        Ok(ordering)
    }
}

/// One-shot [`Seriator::initialize`] followed by [`Seriator::seriate`].
pub fn seriate(dists: ArrayViewD<'_, f64>, options: &SeriateOptions) -> Result<Vec<usize>> {
    Seriator::initialize(options)?.seriate(dists)
}
