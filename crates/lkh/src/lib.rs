//! `lkh` drives the external LKH solver on explicit distance matrices.
//!
//! It covers the pieces needed to treat LKH as a black box:
//! - build TSPLIB problems with a `FULL_MATRIX` edge weight section,
//! - write LKH parameter files,
//! - invoke the LKH executable as a subprocess,
//! - parse the returned TSPLIB tour into zero-based node ids.
//!
//! # Quickstart
//!
//! ```no_run
//! use lkh::{
//!     parameters::LkhParameters,
//!     problem::{TsplibProblem, TsplibProblemType},
//!     process::LkhProcess,
//!     solver::LkhSolver,
//! };
//!
//! fn main() -> lkh::LkhResult<()> {
//!     let problem = TsplibProblem::from_full_matrix(
//!         "sample",
//!         TsplibProblemType::Tsp,
//!         vec![vec![0, 3, 4], vec![3, 0, 5], vec![4, 5, 0]],
//!     )?;
//!
//!     let params = LkhParameters::new("work/problem.tsp").with_time_limit(1.0);
//!     let solver = LkhSolver::new(problem, params);
//!     if let Some(tour) = solver.run(LkhProcess::new("/usr/local/bin/LKH"))? {
//!         println!("{:?}", tour.zero_based_tour());
//!     }
//!     Ok(())
//! }
//! ```

pub mod parameters;
pub mod problem;
pub mod process;
pub mod solver;
pub mod tour;

mod error;
mod spec_writer;

pub use error::{LkhError, LkhResult};
