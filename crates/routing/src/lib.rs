//! In-process routing engine for single-vehicle tours anchored at a depot.
//!
//! The API follows the index-manager style of constraint routing libraries:
//! nodes are mapped to solver indices by a [`RoutingIndexManager`], transit
//! callbacks are registered on a [`RoutingModel`] and receive solver indices,
//! and a solve returns an [`Assignment`] whose `next` links are walked from
//! [`RoutingModel::start`] until [`RoutingModel::is_end`].
//!
//! ```
//! use std::time::Duration;
//! use routing::{RoutingIndexManager, RoutingModel, SearchParameters};
//!
//! let manager = RoutingIndexManager::new(4, 1, 3).unwrap();
//! let mut model = RoutingModel::new(&manager);
//! let transit = model.register_transit_callback(|from, to| {
//!     let (a, b) = (manager.index_to_node(from), manager.index_to_node(to));
//!     if a == 3 || b == 3 { 0 } else { (a as i64 - b as i64).abs() }
//! });
//! model.set_arc_cost_evaluator_of_all_vehicles(transit).unwrap();
//!
//! let params = SearchParameters::default().with_time_limit(Duration::from_millis(50));
//! let assignment = model.solve_with_parameters(&params).unwrap();
//! assert_eq!(assignment.objective_value(), 2);
//! ```

mod arc_costs;
mod assignment;
mod error;
mod manager;
mod model;
mod parameters;
mod search;

pub use assignment::Assignment;
pub use error::{RoutingError, RoutingResult};
pub use manager::RoutingIndexManager;
pub use model::RoutingModel;
pub use parameters::{FirstSolutionStrategy, LocalSearchMetaheuristic, SearchParameters};

/// Engine revision reported during capability negotiation.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
