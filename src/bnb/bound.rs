//! Fractional relaxation upper bound.
//!
//! Fills the remaining capacity greedily in bound order (descending value
//! density) and takes a ceiling-rounded fraction of the first item that no
//! longer fits. Rounding up only loosens the bound, so it stays admissible:
//! never below the best value any completion of the state can reach.
//!
//! # References
//!
//! Dantzig, G. B. (1957), "Discrete-Variable Extremum Problems",
//! *Operations Research* 5(2), 266-288.

use super::types::{ItemCatalog, SearchState};

/// Optimistic value reachable from `state` once the first `decided` depths
/// are fixed.
///
/// Items at depths `< decided` are skipped: their effect is already folded
/// into `state.current_value`. An overfilled state has no feasible
/// completion and is bounded by `-∞`.
///
/// # Examples
///
/// ```
/// use u_knapsack::bnb::{upper_bound, ItemCatalog};
///
/// let catalog = ItemCatalog::new(11.0, &[4.0, 5.0, 8.0, 3.0], &[8.0, 10.0, 15.0, 4.0]).unwrap();
/// // 8 + 10 from the first two items, then ceil(1.875 * 2) = 4 from the third.
/// assert_eq!(upper_bound(&catalog, &catalog.root_state(), 0), 22.0);
/// ```
pub fn upper_bound(catalog: &ItemCatalog, state: &SearchState, decided: usize) -> f64 {
    if state.is_infeasible() {
        return f64::NEG_INFINITY;
    }

    let mut optimistic = state.current_value;
    let mut capacity = state.remaining_capacity;

    for (depth, item) in catalog.bound_ordered_items() {
        if capacity == 0.0 {
            break;
        }
        if depth < decided {
            continue;
        }
        if item.weight <= capacity {
            optimistic += item.value;
            capacity -= item.weight;
        } else {
            optimistic += (item.unit_value * capacity).ceil();
            break;
        }
    }

    optimistic
}
