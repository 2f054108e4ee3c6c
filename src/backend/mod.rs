//! Solver backends behind one trait.
//!
//! The seriation layer only needs "solve this instance within a budget".
//! Each backend reports what it is through a [`Capability`] at negotiation
//! time, so differences between engines never leak into the callers.

mod lkh_process;
mod native;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use self::lkh_process::LkhBackend;
pub use self::native::NativeBackend;

use crate::{
    Error, Result, adapter::SearchStrategy, options::SeriateOptions, problem::SeriationProblem,
    retry::TimeBudget, tour::Tour,
};

pub trait SolverBackend: Send + Sync {
    fn capability(&self) -> Capability;

    /// `Ok(None)` means the budget ran out before any complete tour existed.
    fn solve(
        &self,
        problem: &SeriationProblem<'_, '_>,
        strategy: &SearchStrategy,
        budget: TimeBudget,
    ) -> Result<Option<Tour>>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackendKind {
    Native,
    Lkh,
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Native => "native",
            Self::Lkh => "lkh",
        })
    }
}

/// How a backend addresses nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeIndexing {
    /// Solver indices differ from node ids and are translated by an index manager.
    IndexManager,
    /// Nodes are written as 1-based TSPLIB ids.
    TsplibIds,
}

/// Whether a backend runs the requested [`SearchStrategy`] as is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StrategySupport {
    /// Cheapest-arc construction followed by guided local search.
    Honored,
    /// The engine runs its own construction and improvement instead.
    Substituted,
}

/// What negotiation settled on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Capability {
    pub kind: BackendKind,
    pub version: String,
    pub node_indexing: NodeIndexing,
    pub strategy: StrategySupport,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let indexing = match self.node_indexing {
            NodeIndexing::IndexManager => "index-manager",
            NodeIndexing::TsplibIds => "tsplib-ids",
        };
        let strategy = match self.strategy {
            StrategySupport::Honored => "honored",
            StrategySupport::Substituted => "substituted",
        };
        write!(
            f,
            "backend={} version={} indexing={indexing} strategy={strategy}",
            self.kind, self.version
        )
    }
}

/// Requested backend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BackendChoice {
    #[default]
    Native,
    Lkh,
    /// The first available backend that honors the search strategy.
    Auto,
}

impl FromStr for BackendChoice {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "lkh" => Ok(Self::Lkh),
            "auto" => Ok(Self::Auto),
            _ => Err(Error::invalid_argument(format!(
                "unknown backend '{value}' (expected native, lkh or auto)"
            ))),
        }
    }
}

impl Display for BackendChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Native => "native",
            Self::Lkh => "lkh",
            Self::Auto => "auto",
        })
    }
}

/// Picks a backend for `options`; fails with [`Error::UnsupportedSolver`] when none fits.
pub fn negotiate(options: &SeriateOptions) -> Result<Box<dyn SolverBackend>> {
    let backend: Box<dyn SolverBackend> = match options.backend {
        BackendChoice::Native => Box::new(NativeBackend::new()),
        BackendChoice::Lkh => Box::new(LkhBackend::from_options(options)?),
        BackendChoice::Auto => {
            let mut candidates: Vec<Box<dyn SolverBackend>> = vec![Box::new(NativeBackend::new())];
            match LkhBackend::from_options(options) {
                Ok(lkh) => candidates.push(Box::new(lkh)),
                Err(err) => log::debug!("negotiate: lkh unavailable err={err}"),
            }
            prefer_honored(candidates)
        }
    };

    let capability = backend.capability();
    if capability.strategy == StrategySupport::Substituted {
        log::warn!(
            "negotiate: {} runs its own search instead of cheapest-arc plus guided local search",
            capability.kind
        );
    }
    log::debug!("negotiate: {capability}");
    Ok(backend)
}

/// First candidate that honors the strategy, else the first candidate.
fn prefer_honored(mut candidates: Vec<Box<dyn SolverBackend>>) -> Box<dyn SolverBackend> {
    let position = candidates
        .iter()
        .position(|backend| backend.capability().strategy == StrategySupport::Honored)
        .unwrap_or(0);
    candidates.swap_remove(position)
}
