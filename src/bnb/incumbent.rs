//! Incumbent tracking.

use super::types::SearchState;

/// Best feasible solution found so far during one search.
///
/// Starts from the empty selection, which is always feasible, valued at
/// whatever the root state already holds. Only strict improvements replace
/// it, so the objective never decreases.
#[derive(Debug, Clone)]
pub struct Incumbent {
    objective: f64,
    trail: Vec<u8>,
}

impl Incumbent {
    /// Creates an incumbent for a search over `depth_count` decisions.
    pub fn new(root_value: f64, depth_count: usize) -> Self {
        Self {
            objective: root_value,
            trail: vec![0; depth_count],
        }
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Per-depth decisions of the best solution.
    pub fn trail(&self) -> &[u8] {
        &self.trail
    }

    /// Whether a branch bounded by `bound` could still beat the incumbent.
    pub fn admits(&self, bound: f64) -> bool {
        bound > self.objective
    }

    /// Offers a leaf. Copies `trail` and returns `true` when the leaf is
    /// feasible and strictly better; otherwise changes nothing.
    pub fn offer(&mut self, leaf: &SearchState, trail: &[u8]) -> bool {
        if leaf.is_infeasible() || leaf.current_value <= self.objective {
            return false;
        }
        self.trail.copy_from_slice(trail);
        self.objective = leaf.current_value;
        true
    }
}
