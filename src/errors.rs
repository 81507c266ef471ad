//! Error types for coordinate construction, conversion and comparison
//!
//! Every failure in this crate is raised synchronously where it is detected
//! and is fatal to the call that produced it. Nothing here performs I/O, so
//! there are no retryable variants.

use thiserror::Error;

/// Main error type for geolocus
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// An operation required a coordinate but received none
    #[error("Coordinate is missing: {context}")]
    NullCoordinate {
        /// The operation or argument that was missing its coordinate
        context: &'static str,
    },

    /// A supplied or derived value is NaN or infinite
    #[error("{quantity} is not a finite number: {value}")]
    InvalidNumber {
        /// Name of the offending quantity (e.g. "x", "latitude")
        quantity: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A latitude, longitude or radius lies outside its legal domain
    #[error("{quantity} {value} is outside the valid range {expected}")]
    OutOfRange {
        /// Name of the offending quantity
        quantity: &'static str,
        /// The rejected value
        value: f64,
        /// Human readable description of the legal domain
        expected: &'static str,
    },

    /// Registry configuration was rejected
    #[error("Invalid registry configuration: {0}")]
    InvalidConfig(String),
}

impl CoordinateError {
    /// True for the `OutOfRange` variant
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, CoordinateError::OutOfRange { .. })
    }

    /// True for the `InvalidNumber` variant
    pub fn is_invalid_number(&self) -> bool {
        matches!(self, CoordinateError::InvalidNumber { .. })
    }

    /// True for the `NullCoordinate` variant
    pub fn is_null_coordinate(&self) -> bool {
        matches!(self, CoordinateError::NullCoordinate { .. })
    }
}

/// Result type for geolocus operations
pub type Result<T> = std::result::Result<T, CoordinateError>;
