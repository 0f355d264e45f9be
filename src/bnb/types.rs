//! Item catalog and search state.

use crate::error::{KnapsackError, Result};
use std::cmp::Ordering;

/// A single candidate item of the knapsack problem.
///
/// Items are immutable once built. `unit_value` is `value / weight`, and
/// `+∞` for zero-weight items (which the catalog forces into every
/// solution instead of branching on them).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Position of the item in the caller's input.
    pub index: usize,
    /// Weight consumed from the capacity when selected.
    pub weight: f64,
    /// Value added to the objective when selected.
    pub value: f64,
    /// Value density, the bound order key.
    pub unit_value: f64,
}

impl Item {
    pub fn new(index: usize, weight: f64, value: f64) -> Self {
        let unit_value = if weight > 0.0 {
            value / weight
        } else {
            f64::INFINITY
        };
        Self {
            index,
            weight,
            value,
            unit_value,
        }
    }

    /// Whether the item weighs nothing and is therefore always selected.
    pub fn is_forced(&self) -> bool {
        self.weight == 0.0
    }

    /// Bound order: descending unit value, then ascending weight.
    fn bound_cmp(&self, other: &Item) -> Ordering {
        other
            .unit_value
            .total_cmp(&self.unit_value)
            .then_with(|| self.weight.total_cmp(&other.weight))
    }
}

/// Immutable view of a knapsack instance prepared for branch and bound.
///
/// Holds the items in input order together with the derived views the
/// search needs:
///
/// - the **decision order**: positive-weight items in input order, one
///   search depth per item;
/// - the **bound order**: the same items sorted by descending unit value,
///   lighter first on ties, stored as depths into the decision order;
/// - the **forced** items: zero-weight items, selected up front;
/// - `min_weight`, the lightest branchable weight.
///
/// # Examples
///
/// ```
/// use u_knapsack::bnb::ItemCatalog;
///
/// let catalog = ItemCatalog::new(11.0, &[4.0, 5.0, 8.0, 3.0], &[8.0, 10.0, 15.0, 4.0]).unwrap();
/// assert_eq!(catalog.len(), 4);
/// assert_eq!(catalog.min_weight(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    capacity: f64,
    items: Vec<Item>,
    decision_order: Vec<usize>,
    bound_order: Vec<usize>,
    forced: Vec<usize>,
    min_weight: f64,
}

impl ItemCatalog {
    /// Builds a catalog from parallel weight and value slices.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::InvalidInput`] if the slices differ in length, or if
    /// the capacity, any weight or any value is negative or non-finite.
    pub fn new(capacity: f64, weights: &[f64], values: &[f64]) -> Result<Self> {
        if weights.len() != values.len() {
            return Err(KnapsackError::InvalidInput(format!(
                "weights has {} entries but values has {}",
                weights.len(),
                values.len()
            )));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(KnapsackError::InvalidInput(format!(
                "capacity must be finite and non-negative, got {capacity}"
            )));
        }
        for (i, (&w, &v)) in weights.iter().zip(values).enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(KnapsackError::InvalidInput(format!(
                    "weight of item {i} must be finite and non-negative, got {w}"
                )));
            }
            if !v.is_finite() || v < 0.0 {
                return Err(KnapsackError::InvalidInput(format!(
                    "value of item {i} must be finite and non-negative, got {v}"
                )));
            }
        }

        let items: Vec<Item> = weights
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (&w, &v))| Item::new(i, w, v))
            .collect();

        let (forced, decision_order): (Vec<usize>, Vec<usize>) =
            (0..items.len()).partition(|&i| items[i].is_forced());

        let mut bound_order: Vec<usize> = (0..decision_order.len()).collect();
        // Stable: full ties keep input order.
        bound_order.sort_by(|&a, &b| {
            items[decision_order[a]].bound_cmp(&items[decision_order[b]])
        });

        let min_weight = decision_order
            .iter()
            .map(|&i| items[i].weight)
            .fold(f64::INFINITY, f64::min);

        Ok(Self {
            capacity,
            items,
            decision_order,
            bound_order,
            forced,
            min_weight,
        })
    }

    /// Builds a catalog where every item's value equals its weight.
    pub fn from_weights(capacity: f64, weights: &[f64]) -> Result<Self> {
        Self::new(capacity, weights, weights)
    }

    /// Knapsack capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Number of items, forced ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in input order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of branching decisions (positive-weight items).
    pub fn depth_count(&self) -> usize {
        self.decision_order.len()
    }

    /// The item decided at search depth `depth`.
    pub fn item_at_depth(&self, depth: usize) -> &Item {
        &self.items[self.decision_order[depth]]
    }

    /// Search depths sorted by bound order.
    pub fn bound_order(&self) -> &[usize] {
        &self.bound_order
    }

    /// Bound-ordered iterator of `(depth, item)` pairs.
    pub fn bound_ordered_items(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
        self.bound_order
            .iter()
            .map(move |&d| (d, &self.items[self.decision_order[d]]))
    }

    /// Input indices of the zero-weight items.
    pub fn forced(&self) -> &[usize] {
        &self.forced
    }

    /// Summed value of the forced items.
    pub fn forced_value(&self) -> f64 {
        self.forced.iter().map(|&i| self.items[i].value).sum()
    }

    /// Smallest positive weight; `+∞` when nothing can be branched on.
    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    /// State before any branching decision: forced items taken, full capacity.
    pub fn root_state(&self) -> SearchState {
        SearchState::new(self.forced_value(), self.capacity)
    }

    /// Maps a per-depth trail back to a 0/1 selection in input order,
    /// forced items included.
    pub fn selection_from_trail(&self, trail: &[u8]) -> Vec<u8> {
        let mut selection = vec![0u8; self.items.len()];
        for &i in &self.forced {
            selection[i] = 1;
        }
        for (depth, &taken) in trail.iter().enumerate() {
            selection[self.decision_order[depth]] = taken;
        }
        selection
    }

    /// Summed weight of a selection vector in input order.
    pub fn selection_weight(&self, selection: &[u8]) -> f64 {
        self.items
            .iter()
            .zip(selection)
            .filter(|&(_, &x)| x == 1)
            .map(|(item, _)| item.weight)
            .sum()
    }

    /// Summed value of a selection vector in input order.
    pub fn selection_value(&self, selection: &[u8]) -> f64 {
        self.items
            .iter()
            .zip(selection)
            .filter(|&(_, &x)| x == 1)
            .map(|(item, _)| item.value)
            .sum()
    }
}

/// A node of the search tree: value collected and capacity left after the
/// decisions on the current path, plus the node's optimistic bound.
///
/// `remaining_capacity` goes negative when the path overfills the sack.
/// A fresh state's `bound` is `+∞`, which never prunes; the search
/// replaces it with [`upper_bound`](super::upper_bound) before using it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    pub current_value: f64,
    pub remaining_capacity: f64,
    pub bound: f64,
}

impl SearchState {
    pub fn new(current_value: f64, remaining_capacity: f64) -> Self {
        Self {
            current_value,
            remaining_capacity,
            bound: f64::INFINITY,
        }
    }

    /// Child state that leaves the next item out.
    pub fn exclude(&self) -> Self {
        Self::new(self.current_value, self.remaining_capacity)
    }

    /// Child state that puts `item` in the sack.
    pub fn include(&self, item: &Item) -> Self {
        Self::new(
            self.current_value + item.value,
            self.remaining_capacity - item.weight,
        )
    }

    pub fn is_infeasible(&self) -> bool {
        self.remaining_capacity < 0.0
    }
}
