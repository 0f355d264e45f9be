//! Branch and bound execution engine.
//!
//! # Algorithm
//!
//! Depth-first search over the include/exclude decision of each item, in
//! input order:
//!
//! 1. A node with every item decided, a full sack, or less room than the
//!    lightest item is a leaf and is offered to the incumbent.
//! 2. An overfilled node is dropped.
//! 3. Otherwise both children are bounded with the fractional relaxation and
//!    the more promising one is explored first. A child whose bound does not
//!    exceed the incumbent when its turn comes is skipped.
//!
//! The tree is walked with an explicit frame stack, so the depth is limited
//! by heap memory rather than the call stack.
//!
//! # Reference
//!
//! Kolesar, P. J. (1967), "A Branch and Bound Algorithm for the Knapsack
//! Problem", *Management Science* 13(9), 723-735.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::bound::upper_bound;
use super::config::BnbConfig;
use super::incumbent::Incumbent;
use super::stats::BnbStats;
use super::types::{ItemCatalog, SearchState};
use crate::error::{KnapsackError, Result};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// The tree was exhausted; the selection is optimal.
    Optimal,
    /// Stopped by the cancellation flag; the selection is the best found.
    Cancelled,
}

/// Result of a branch and bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// 0/1 per input item, `1` meaning selected.
    pub selection: Vec<u8>,
    /// Summed value of the selected items.
    pub objective: f64,
    /// Summed weight of the selected items.
    pub weight: f64,
    pub status: SolveStatus,
    pub stats: BnbStats,
}

impl BnbResult {
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Input indices of the selected items.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x == 1)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Executes the branch and bound search.
pub struct BnbRunner;

impl BnbRunner {
    /// Solves the instance to optimality.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_knapsack::bnb::{BnbConfig, BnbRunner, ItemCatalog};
    ///
    /// let catalog = ItemCatalog::new(11.0, &[4.0, 5.0, 8.0, 3.0], &[8.0, 10.0, 15.0, 4.0]).unwrap();
    /// let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
    /// assert_eq!(result.selection, vec![0, 0, 1, 1]);
    /// assert_eq!(result.objective, 19.0);
    /// ```
    pub fn run(catalog: &ItemCatalog, config: &BnbConfig) -> Result<BnbResult> {
        Self::run_with_cancel(catalog, config, None)
    }

    /// Solves with an optional cancellation flag, polled before each node
    /// expansion. A cancelled run returns the incumbent found so far.
    pub fn run_with_cancel(
        catalog: &ItemCatalog,
        config: &BnbConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BnbResult> {
        config.validate().map_err(KnapsackError::Config)?;
        Ok(Self::execute(catalog, config, cancel.as_deref()))
    }

    /// Runs the search with an already validated configuration.
    pub(crate) fn execute(
        catalog: &ItemCatalog,
        config: &BnbConfig,
        cancel: Option<&AtomicBool>,
    ) -> BnbResult {
        let start = Instant::now();
        let mut root = catalog.root_state();
        root.bound = upper_bound(catalog, &root, 0);

        info!(
            event = "solve_start",
            item_count = catalog.len(),
            branch_count = catalog.depth_count(),
            forced_count = catalog.forced().len(),
            capacity = catalog.capacity(),
            root_bound = root.bound,
        );

        let mut ctx = SearchContext::new(catalog, config, cancel, root.current_value);
        ctx.stats.root_bound = root.bound;
        ctx.search(root);

        let status = if ctx.cancelled {
            SolveStatus::Cancelled
        } else {
            SolveStatus::Optimal
        };
        let mut stats = ctx.stats;
        stats.elapsed = start.elapsed();

        let selection = catalog.selection_from_trail(ctx.incumbent.trail());
        let objective = catalog.selection_value(&selection);
        let weight = catalog.selection_weight(&selection);

        info!(
            event = "solve_end",
            status = ?status,
            objective,
            weight,
            nodes = stats.nodes_explored,
            prunings = stats.bound_prunings,
            elapsed_ms = (stats.elapsed.as_millis() as u64),
        );

        BnbResult {
            selection,
            objective,
            weight,
            status,
            stats,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Branch {
    state: SearchState,
    take: u8,
}

/// An expanded node: its depth and its two children in exploration order.
#[derive(Debug)]
struct Frame {
    depth: usize,
    branches: [Branch; 2],
    next: usize,
}

/// Mutable state of one search. Never outlives the call that created it.
struct SearchContext<'a> {
    catalog: &'a ItemCatalog,
    config: &'a BnbConfig,
    cancel: Option<&'a AtomicBool>,
    trail: Vec<u8>,
    incumbent: Incumbent,
    stack: Vec<Frame>,
    stats: BnbStats,
    cancelled: bool,
}

impl<'a> SearchContext<'a> {
    fn new(
        catalog: &'a ItemCatalog,
        config: &'a BnbConfig,
        cancel: Option<&'a AtomicBool>,
        root_value: f64,
    ) -> Self {
        let depth_count = catalog.depth_count();
        Self {
            catalog,
            config,
            cancel,
            trail: vec![0; depth_count],
            incumbent: Incumbent::new(root_value, depth_count),
            stack: Vec::with_capacity(depth_count),
            stats: BnbStats::default(),
            cancelled: false,
        }
    }

    fn search(&mut self, root: SearchState) {
        self.visit(root, 0);

        while !self.cancelled {
            let Some(frame) = self.stack.last_mut() else {
                break;
            };
            let depth = frame.depth;
            let next = frame.branches.get(frame.next).copied();
            frame.next += 1;

            // Backtrack whatever the previous sibling marked.
            self.trail[depth] = 0;

            let Some(branch) = next else {
                self.stack.pop();
                continue;
            };

            if !self.incumbent.admits(branch.state.bound) {
                self.stats.on_bound_pruning();
                continue;
            }

            self.trail[depth] = branch.take;
            self.visit(branch.state, depth + 1);
        }
    }

    /// Classifies a node: evaluates leaves, drops overfilled states and
    /// pushes a frame for everything else.
    fn visit(&mut self, state: SearchState, depth: usize) {
        self.stats.on_node_explored(depth);

        if depth == self.catalog.depth_count() {
            self.evaluate(&state, depth);
        } else if state.is_infeasible() {
            self.stats.on_infeasible();
        } else if state.remaining_capacity <= self.config.capacity_tolerance
            || state.remaining_capacity < self.catalog.min_weight()
        {
            self.evaluate(&state, depth);
        } else {
            self.expand(state, depth);
        }
    }

    fn expand(&mut self, state: SearchState, depth: usize) {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                debug!(event = "solve_cancelled", depth, objective = self.incumbent.objective());
                self.cancelled = true;
                return;
            }
        }

        let item = self.catalog.item_at_depth(depth);
        let decided = depth + 1;

        let mut exclude = state.exclude();
        exclude.bound = upper_bound(self.catalog, &exclude, decided);
        let mut include = state.include(item);
        include.bound = upper_bound(self.catalog, &include, decided);

        let exclude = Branch {
            state: exclude,
            take: 0,
        };
        let include = Branch {
            state: include,
            take: 1,
        };
        let branches = if self.config.order_by_bound && exclude.state.bound > include.state.bound
        {
            [exclude, include]
        } else {
            [include, exclude]
        };

        self.stack.push(Frame {
            depth,
            branches,
            next: 0,
        });
    }

    fn evaluate(&mut self, leaf: &SearchState, depth: usize) {
        self.stats.on_leaf();
        if !self.incumbent.offer(leaf, &self.trail) {
            return;
        }
        self.stats.on_improvement();
        if self.config.log_progress {
            debug!(
                event = "incumbent_improved",
                objective = leaf.current_value,
                remaining_capacity = leaf.remaining_capacity,
                depth,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(catalog: &ItemCatalog) -> f64 {
        let n = catalog.len();
        let mut best = 0.0f64;
        for mask in 0u32..(1 << n) {
            let selection: Vec<u8> = (0..n).map(|i| ((mask >> i) & 1) as u8).collect();
            if catalog.selection_weight(&selection) <= catalog.capacity() {
                best = best.max(catalog.selection_value(&selection));
            }
        }
        best
    }

    #[test]
    fn test_small_instance_with_values() {
        let catalog =
            ItemCatalog::new(11.0, &[4.0, 5.0, 8.0, 3.0], &[8.0, 10.0, 15.0, 4.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();

        assert_eq!(result.selection, vec![0, 0, 1, 1]);
        assert!((result.objective - 19.0).abs() < 1e-9);
        assert!((result.weight - 11.0).abs() < 1e-9);
        assert!(result.is_optimal());
        assert_eq!(result.selected_indices(), vec![2, 3]);
    }

    #[test]
    fn test_small_instance_weights_only() {
        let catalog =
            ItemCatalog::from_weights(120.0, &[28.0, 25.0, 35.0, 45.0, 20.0, 45.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();

        assert_eq!(result.selection, vec![1, 1, 0, 1, 1, 0]);
        assert!(
            (result.objective - 118.0).abs() < 1e-3,
            "expected 118, got {}",
            result.objective
        );
    }

    #[test]
    fn test_zero_capacity() {
        let catalog = ItemCatalog::from_weights(0.0, &[3.0, 1.0, 2.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert_eq!(result.selection, vec![0, 0, 0]);
        assert_eq!(result.objective, 0.0);
    }

    #[test]
    fn test_single_oversized_item() {
        let catalog = ItemCatalog::new(5.0, &[6.0], &[100.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert_eq!(result.selection, vec![0]);
        assert_eq!(result.objective, 0.0);
    }

    #[test]
    fn test_empty_instance() {
        let catalog = ItemCatalog::from_weights(10.0, &[]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert!(result.selection.is_empty());
        assert_eq!(result.objective, 0.0);
        assert!(result.is_optimal());
    }

    #[test]
    fn test_zero_weight_items_always_selected() {
        // The heavy item fills the sack exactly; the free items still count.
        let catalog =
            ItemCatalog::new(5.0, &[5.0, 0.0, 2.0, 0.0], &[5.0, 3.0, 1.0, 0.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert_eq!(result.selection, vec![1, 1, 0, 1]);
        assert!((result.objective - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_zero_weight_items() {
        let catalog = ItemCatalog::new(0.0, &[0.0, 0.0], &[2.0, 0.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert_eq!(result.selection, vec![1, 1]);
        assert!((result.objective - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_brute_force() {
        let cases: Vec<(f64, Vec<f64>, Vec<f64>)> = vec![
            (10.0, vec![5.0, 4.0, 6.0, 3.0], vec![10.0, 40.0, 30.0, 50.0]),
            (50.0, vec![10.0, 20.0, 30.0], vec![60.0, 100.0, 120.0]),
            (15.0, vec![12.0, 2.0, 1.0, 1.0, 4.0], vec![4.0, 2.0, 1.0, 2.0, 10.0]),
            (7.0, vec![3.0, 3.0, 3.0, 4.0], vec![3.0, 3.0, 3.0, 5.0]),
            (9.5, vec![2.5, 3.5, 4.5, 1.5, 5.5], vec![3.0, 4.0, 5.0, 2.0, 6.0]),
        ];
        for (capacity, weights, values) in cases {
            let catalog = ItemCatalog::new(capacity, &weights, &values).unwrap();
            let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
            let expected = brute_force(&catalog);
            assert!(
                (result.objective - expected).abs() < 1e-9,
                "capacity {capacity}: expected {expected}, got {}",
                result.objective
            );
            assert!(result.weight <= capacity + 1e-9);
        }
    }

    #[test]
    fn test_order_by_bound_disabled_same_objective() {
        let catalog = ItemCatalog::new(
            26.0,
            &[12.0, 7.0, 11.0, 8.0, 9.0],
            &[24.0, 13.0, 23.0, 15.0, 16.0],
        )
        .unwrap();
        let ordered = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        let plain =
            BnbRunner::run(&catalog, &BnbConfig::default().with_order_by_bound(false)).unwrap();
        assert!((ordered.objective - plain.objective).abs() < 1e-9);
        assert!((ordered.objective - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_capacity_tolerance_stops_at_near_full() {
        let catalog = ItemCatalog::new(2.5, &[2.0, 1.0, 0.4], &[10.0, 1.0, 1.0]).unwrap();

        // Exact: after the heavy item 0.5 is left, enough for the 0.4 item.
        let exact = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert_eq!(exact.selection, vec![1, 0, 1]);
        assert!((exact.objective - 11.0).abs() < 1e-9);
        assert_eq!(exact.stats.nodes_explored, 4);

        // Within tolerance the sack counts as full right after the heavy item.
        let config = BnbConfig::default().with_capacity_tolerance(0.5);
        let tolerant = BnbRunner::run(&catalog, &config).unwrap();
        assert_eq!(tolerant.selection, vec![1, 0, 0]);
        assert!((tolerant.objective - 10.0).abs() < 1e-9);
        assert_eq!(tolerant.stats.nodes_explored, 2);
    }

    #[test]
    fn test_capacity_tolerance_does_not_absorb_subtraction_drift() {
        // 0.4 + 0.1 == 0.5, but 0.5 - 0.4 - 0.1 is slightly negative.
        let catalog = ItemCatalog::from_weights(0.5, &[0.4, 0.1]).unwrap();
        assert!(catalog.selection_weight(&[1, 1]) <= 0.5);

        for config in [
            BnbConfig::default(),
            BnbConfig::default().with_capacity_tolerance(1e-9),
        ] {
            let result = BnbRunner::run(&catalog, &config).unwrap();
            assert_eq!(result.selection, vec![1, 0]);
            assert!((result.objective - 0.4).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_config() {
        let catalog = ItemCatalog::from_weights(1.0, &[1.0]).unwrap();
        let config = BnbConfig::default().with_capacity_tolerance(-1.0);
        let err = BnbRunner::run(&catalog, &config).unwrap_err();
        assert!(matches!(err, KnapsackError::Config(_)));
    }

    #[test]
    fn test_cancellation() {
        let catalog =
            ItemCatalog::from_weights(120.0, &[28.0, 25.0, 35.0, 45.0, 20.0, 45.0]).unwrap();

        // Set before running so the very first expansion stops the search.
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            BnbRunner::run_with_cancel(&catalog, &BnbConfig::default(), Some(cancel)).unwrap();

        assert_eq!(result.status, SolveStatus::Cancelled);
        assert_eq!(result.selection, vec![0; 6]);
        assert_eq!(result.objective, 0.0);
    }

    #[test]
    fn test_unset_cancel_flag_does_not_change_result() {
        let catalog =
            ItemCatalog::new(11.0, &[4.0, 5.0, 8.0, 3.0], &[8.0, 10.0, 15.0, 4.0]).unwrap();
        let cancel = Arc::new(AtomicBool::new(false));
        let result =
            BnbRunner::run_with_cancel(&catalog, &BnbConfig::default(), Some(cancel)).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.selection, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_stats_recorded() {
        let catalog =
            ItemCatalog::new(11.0, &[4.0, 5.0, 8.0, 3.0], &[8.0, 10.0, 15.0, 4.0]).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        let stats = &result.stats;

        assert!(stats.nodes_explored > 1);
        assert!(stats.leaves_evaluated >= 1);
        assert!(stats.improvements >= 1);
        assert!(stats.max_depth <= 4);
        assert!((stats.root_bound - 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_deep_instance_does_not_overflow_stack() {
        // Every item fits, so the search walks all the way down.
        let weights = vec![1.0; 3000];
        let catalog = ItemCatalog::from_weights(3000.0, &weights).unwrap();
        let result = BnbRunner::run(&catalog, &BnbConfig::default()).unwrap();
        assert!((result.objective - 3000.0).abs() < 1e-9);
        assert_eq!(result.stats.max_depth, 3000);
    }
}
