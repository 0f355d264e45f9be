//! Branch and bound configuration.

/// Configuration for the branch and bound search.
///
/// # Examples
///
/// ```
/// use u_knapsack::bnb::BnbConfig;
///
/// let config = BnbConfig::default()
///     .with_capacity_tolerance(1e-9)
///     .with_order_by_bound(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Remaining capacity at or below this value counts as a full sack.
    ///
    /// The default `0.0` is an exact comparison. A positive value ends a
    /// path early once the room left is within the tolerance, giving up any
    /// item light enough to still fit; keep it below the smallest weight
    /// unless that trade is wanted.
    ///
    /// Feasibility itself is never relaxed: a path is dropped as soon as its
    /// remaining capacity is negative. Capacity is tracked by repeated
    /// subtraction, so a selection whose weights sum to exactly the capacity
    /// can land one ulp below zero and be rejected; the tolerance does not
    /// cover that case.
    pub capacity_tolerance: f64,

    /// Explore the child with the higher bound first.
    ///
    /// When disabled, the include branch always goes first. Both settings
    /// reach the same objective; only the traversal (and for ties between
    /// equally good selections, the returned one) changes.
    pub order_by_bound: bool,

    /// Emit a `debug` event for every incumbent improvement.
    pub log_progress: bool,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            capacity_tolerance: 0.0,
            order_by_bound: true,
            log_progress: true,
        }
    }
}

impl BnbConfig {
    pub fn with_capacity_tolerance(mut self, tolerance: f64) -> Self {
        self.capacity_tolerance = tolerance;
        self
    }

    pub fn with_order_by_bound(mut self, enabled: bool) -> Self {
        self.order_by_bound = enabled;
        self
    }

    pub fn with_log_progress(mut self, enabled: bool) -> Self {
        self.log_progress = enabled;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.capacity_tolerance.is_finite() || self.capacity_tolerance < 0.0 {
            return Err(format!(
                "capacity_tolerance must be finite and non-negative, got {}",
                self.capacity_tolerance
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BnbConfig::default();
        assert_eq!(config.capacity_tolerance, 0.0);
        assert!(config.order_by_bound);
        assert!(config.log_progress);
    }

    #[test]
    fn test_validate_ok() {
        assert!(BnbConfig::default().validate().is_ok());
        assert!(BnbConfig::default()
            .with_capacity_tolerance(1e-6)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_bad_tolerance() {
        assert!(BnbConfig::default()
            .with_capacity_tolerance(-1.0)
            .validate()
            .is_err());
        assert!(BnbConfig::default()
            .with_capacity_tolerance(f64::NAN)
            .validate()
            .is_err());
    }
}
