//! Registry configuration

use serde::Serialize;

use crate::constants::EPSILON;
use crate::errors::{CoordinateError, Result};

/// How the registry decides that a requested location is already interned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum KeyStrategy {
    /// Match any entry whose projection lies within the tolerance on every
    /// axis; the earliest inserted match wins. Chains of near-duplicates are
    /// not merged, so identity inherits the non-transitivity of `is_equal`.
    #[default]
    Tolerance,
    /// Snap projections to a fixed grid with the tolerance as pitch and
    /// intern per grid cell. Deterministic regardless of insertion order,
    /// but two points closer than the tolerance can land in neighbouring
    /// cells and stay distinct.
    Grid,
}

/// Settings for a [`CoordinateRegistry`](super::CoordinateRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegistryConfig {
    pub tolerance: f64,
    pub key_strategy: KeyStrategy,
}

impl RegistryConfig {
    /// Default configuration: tolerance 0.01, [`KeyStrategy::Tolerance`]
    pub fn new() -> Self {
        Self {
            tolerance: EPSILON,
            key_strategy: KeyStrategy::Tolerance,
        }
    }

    /// Set the per-axis matching tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the key strategy
    pub fn with_key_strategy(mut self, key_strategy: KeyStrategy) -> Self {
        self.key_strategy = key_strategy;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CoordinateError::InvalidConfig(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.key_strategy, KeyStrategy::Tolerance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::new()
            .with_tolerance(0.5)
            .with_key_strategy(KeyStrategy::Grid);
        assert_eq!(config.tolerance, 0.5);
        assert_eq!(config.key_strategy, KeyStrategy::Grid);
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for tolerance in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let err = RegistryConfig::new()
                .with_tolerance(tolerance)
                .validate()
                .unwrap_err();
            assert!(matches!(err, CoordinateError::InvalidConfig(_)));
        }
    }
}
