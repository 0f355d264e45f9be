//! Exact 0/1 knapsack solver.
//!
//! Chooses a subset of items whose total weight fits a capacity while
//! maximizing total value, using depth-first branch and bound pruned by the
//! fractional relaxation bound. Aimed at instances of roughly 100–500 items;
//! run time depends heavily on how the data is arranged.
//!
//! - **Branch and Bound** ([`bnb`]): item catalog, bound estimator, search
//!   engine, incumbent tracking and the [`KnapsackSolver`] front end.
//! - **Instances** ([`instance`]): reproducible random instance generation.
//!
//! # Example
//!
//! ```
//! use u_knapsack::KnapsackSolver;
//!
//! let mut solver = KnapsackSolver::with_values(
//!     11.0,
//!     &[4.0, 5.0, 8.0, 3.0],
//!     &[8.0, 10.0, 15.0, 4.0],
//! ).unwrap();
//!
//! assert_eq!(solver.solve(), vec![0, 0, 1, 1]);
//! assert_eq!(solver.objective_value(), 19.0);
//! ```
//!
//! # Logging
//!
//! Solve start and end are reported through `tracing` at `info` level,
//! incumbent improvements at `debug`. Install any subscriber to see them.

pub mod bnb;
pub mod error;
pub mod instance;

pub use bnb::KnapsackSolver;
pub use error::{KnapsackError, Result};
