//! Reproducible random knapsack instances.
//!
//! The classic generator families, with integer weights in `[1, range]` and
//! capacity set to half the total weight:
//!
//! - **Uncorrelated**: values drawn independently of weights.
//! - **Weakly correlated**: value within `range / 10` of the weight.
//! - **Strongly correlated**: value = weight + `range / 10`.
//! - **Subset sum**: value = weight.
//!
//! Correlated families are markedly harder for bound-based pruning.
//!
//! # References
//!
//! Pisinger, D. (2005), "Where are the hard knapsack problems?",
//! *Computers & Operations Research* 32(9), 2271-2284.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bnb::ItemCatalog;
use crate::error::Result;

/// Correlation between weights and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstanceKind {
    Uncorrelated,
    WeaklyCorrelated,
    StronglyCorrelated,
    SubsetSum,
}

/// A generated knapsack instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackInstance {
    pub capacity: f64,
    pub weights: Vec<f64>,
    pub values: Vec<f64>,
}

impl KnapsackInstance {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Validates the instance into a catalog.
    pub fn catalog(&self) -> Result<ItemCatalog> {
        ItemCatalog::new(self.capacity, &self.weights, &self.values)
    }
}

/// Generates `n` items of the given kind with weights in `[1, range]`.
///
/// The same `seed` always yields the same instance.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::{generate, InstanceKind};
///
/// let instance = generate(100, 1000, InstanceKind::WeaklyCorrelated, 7);
/// assert_eq!(instance.len(), 100);
/// assert_eq!(instance, generate(100, 1000, InstanceKind::WeaklyCorrelated, 7));
/// ```
pub fn generate(n: usize, range: u32, kind: InstanceKind, seed: u64) -> KnapsackInstance {
    let range = range.max(1);
    // u64 so that `w + spread` cannot overflow for ranges near u32::MAX.
    let spread = u64::from((range / 10).max(1));
    let mut rng = StdRng::seed_from_u64(seed);

    let mut weights = Vec::with_capacity(n);
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        let w = u64::from(rng.random_range(1..=range));
        let v = match kind {
            InstanceKind::Uncorrelated => u64::from(rng.random_range(1..=range)),
            InstanceKind::WeaklyCorrelated => {
                let lo = w.saturating_sub(spread).max(1);
                rng.random_range(lo..=w + spread)
            }
            InstanceKind::StronglyCorrelated => w + spread,
            InstanceKind::SubsetSum => w,
        };
        weights.push(w as f64);
        values.push(v as f64);
    }

    let capacity = (weights.iter().sum::<f64>() / 2.0).floor();
    KnapsackInstance {
        capacity,
        weights,
        values,
    }
}
