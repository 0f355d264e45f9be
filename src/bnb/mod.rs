//! Branch and Bound (BnB) for the 0/1 knapsack problem.
//!
//! Exact depth-first search over include/exclude decisions, pruned with the
//! fractional (LP) relaxation bound. Items are decided in input order; the
//! bound fills the sack in descending value density.
//!
//! # Key Components
//!
//! - **Catalog**: [`ItemCatalog`], [`Item`] — validated items and the bound order
//! - **Bound**: [`upper_bound`] — admissible optimistic estimate of a node
//! - **Search**: [`BnbRunner`] — explicit-stack depth-first search
//! - **Incumbent**: [`Incumbent`] — best feasible selection found so far
//! - **Front end**: [`KnapsackSolver`] — construct, `solve`, read the objective
//!
//! # Zero-weight items
//!
//! A zero-weight item has no meaningful value density. Such items are
//! selected unconditionally and never branched on; their values are part of
//! every state's current value from the root down.
//!
//! # References
//!
//! - Kolesar (1967), "A Branch and Bound Algorithm for the Knapsack Problem"
//! - Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer
//!   Implementations", ch. 2

mod bound;
mod config;
mod incumbent;
mod runner;
mod solver;
mod stats;
mod types;

pub use bound::upper_bound;
pub use config::BnbConfig;
pub use incumbent::Incumbent;
pub use runner::{BnbResult, BnbRunner, SolveStatus};
pub use solver::KnapsackSolver;
pub use stats::BnbStats;
pub use types::{Item, ItemCatalog, SearchState};
