//! Search statistics.

use std::fmt;
use std::time::Duration;

/// Counters collected during one branch and bound run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbStats {
    /// Nodes visited, root included.
    pub nodes_explored: u64,
    /// Nodes handed to the incumbent as terminal states.
    pub leaves_evaluated: u64,
    /// Overfilled nodes dropped without evaluation.
    pub infeasible_discarded: u64,
    /// Child branches skipped because their bound could not beat the incumbent.
    pub bound_prunings: u64,
    /// Times the incumbent was replaced.
    pub improvements: u64,
    /// Deepest level reached.
    pub max_depth: usize,
    /// Upper bound of the root state.
    pub root_bound: f64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl BnbStats {
    #[inline]
    pub fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_leaf(&mut self) {
        self.leaves_evaluated = self.leaves_evaluated.saturating_add(1);
    }

    #[inline]
    pub fn on_infeasible(&mut self) {
        self.infeasible_discarded = self.infeasible_discarded.saturating_add(1);
    }

    #[inline]
    pub fn on_bound_pruning(&mut self) {
        self.bound_prunings = self.bound_prunings.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }
}

impl fmt::Display for BnbStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch and bound statistics")?;
        writeln!(f, "  nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  leaves evaluated:     {}", self.leaves_evaluated)?;
        writeln!(f, "  infeasible discarded: {}", self.infeasible_discarded)?;
        writeln!(f, "  bound prunings:       {}", self.bound_prunings)?;
        writeln!(f, "  improvements:         {}", self.improvements)?;
        writeln!(f, "  max depth:            {}", self.max_depth)?;
        writeln!(f, "  root bound:           {}", self.root_bound)?;
        write!(f, "  elapsed:              {:.3?}", self.elapsed)
    }
}
