//! Knapsack solver front end.

use super::config::BnbConfig;
use super::runner::{BnbResult, BnbRunner};
use super::types::ItemCatalog;
use crate::error::Result;

/// Exact 0/1 knapsack solver.
///
/// Validates and sorts the items once at construction; every call to
/// [`solve`](KnapsackSolver::solve) runs a fresh search with its own
/// mutable state, so repeated calls return identical answers. The solver
/// holds only the last result, and a `&mut self` receiver keeps calls from
/// overlapping.
///
/// # Examples
///
/// ```
/// use u_knapsack::bnb::KnapsackSolver;
///
/// let mut solver = KnapsackSolver::new(120.0, &[28.0, 25.0, 35.0, 45.0, 20.0, 45.0]).unwrap();
/// let selection = solver.solve();
///
/// assert_eq!(selection, vec![1, 1, 0, 1, 1, 0]);
/// assert_eq!(solver.objective_value(), 118.0);
/// ```
#[derive(Debug, Clone)]
pub struct KnapsackSolver {
    catalog: ItemCatalog,
    config: BnbConfig,
    last: Option<BnbResult>,
}

impl KnapsackSolver {
    /// Creates a solver whose item values equal their weights.
    pub fn new(capacity: f64, weights: &[f64]) -> Result<Self> {
        Self::with_values(capacity, weights, weights)
    }

    /// Creates a solver with distinct item values.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::InvalidInput`](crate::KnapsackError::InvalidInput)
    /// on mismatched lengths or a negative capacity, weight or value.
    pub fn with_values(capacity: f64, weights: &[f64], values: &[f64]) -> Result<Self> {
        Ok(Self {
            catalog: ItemCatalog::new(capacity, weights, values)?,
            config: BnbConfig::default(),
            last: None,
        })
    }

    /// Replaces the search configuration.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::Config`](crate::KnapsackError::Config) if the
    /// configuration does not validate.
    pub fn with_config(mut self, config: BnbConfig) -> Result<Self> {
        config.validate().map_err(crate::KnapsackError::Config)?;
        self.config = config;
        Ok(self)
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BnbConfig {
        &self.config
    }

    /// Solves the instance and returns one 0/1 entry per input item.
    pub fn solve(&mut self) -> Vec<u8> {
        // The configuration was validated on the way in.
        let result = BnbRunner::execute(&self.catalog, &self.config, None);
        let selection = result.selection.clone();
        self.last = Some(result);
        selection
    }

    /// Objective of the most recent [`solve`](KnapsackSolver::solve), `0.0`
    /// before the first one.
    pub fn objective_value(&self) -> f64 {
        self.last.as_ref().map_or(0.0, |r| r.objective)
    }

    /// Full result of the most recent solve, statistics included.
    pub fn last_result(&self) -> Option<&BnbResult> {
        self.last.as_ref()
    }
}
