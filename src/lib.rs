//! Seriation: order elements so that similar ones end up next to each other.
//!
//! Given pairwise distances, [`seriate`] returns the permutation whose
//! consecutive distances sum to (approximately) the least total. The problem
//! is posed as a travelling salesman tour over the elements plus one dummy
//! depot that costs nothing to enter or leave; removing the depot from the
//! tour leaves the shortest open path.
//!
//! ```no_run
//! use ndarray::arr1;
//! use seriate::{SeriateOptions, seriate};
//!
//! // Condensed distances of five points on a line.
//! let dists = arr1(&[1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 1.0, 2.0, 1.0]);
//! let order = seriate(dists.view().into_dyn(), &SeriateOptions::default())?;
//! assert!(order == [0, 1, 2, 3, 4] || order == [4, 3, 2, 1, 0]);
//! # Ok::<(), seriate::Error>(())
//! ```

pub mod adapter;
pub mod backend;
pub mod distance;
mod error;
mod file_cleanup;
pub mod input;
pub mod logging;
pub mod options;
pub mod problem;
pub mod quantize;
pub mod retry;
mod seriator;
pub mod tour;

pub use backend::{BackendChoice, Capability, SolverBackend};
pub use distance::DistanceMatrix;
pub use error::{Error, Result};
pub use options::{CliOptions, SeriateOptions};
pub use seriator::{Seriator, seriate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
