//! Validation predicates and assertions
//!
//! The `is_*` predicates never fail; the `assert_*` functions turn a failed
//! predicate into a [`CoordinateError`]. Assertions are called at every
//! construction point and around every derived computation, so arithmetic
//! that produces NaN is caught where it happens rather than at the API
//! boundary.

use crate::constants::{LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN};
use crate::errors::{CoordinateError, Result};

/// True if `value` is neither NaN nor infinite
pub fn is_finite_number(value: f64) -> bool {
    value.is_finite()
}

/// True if `value` is a latitude in `[-90, 90]`
pub fn is_valid_latitude(value: f64) -> bool {
    (LATITUDE_MIN..=LATITUDE_MAX).contains(&value)
}

/// True if `value` is a longitude in `[-180, 180]`
pub fn is_valid_longitude(value: f64) -> bool {
    (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&value)
}

/// True if `value` is a strictly positive radius
pub fn is_valid_radius(value: f64) -> bool {
    value > 0.0
}

/// Fails with `InvalidNumber` if `value` is NaN or infinite
///
/// # Examples
///
/// ```rust
/// use geolocus::validation::assert_finite;
///
/// assert!(assert_finite("x", 1.5).is_ok());
/// assert!(assert_finite("x", f64::NAN).is_err());
/// ```
pub fn assert_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if is_finite_number(value) {
        Ok(value)
    } else {
        Err(CoordinateError::InvalidNumber { quantity, value })
    }
}

/// Fails with `InvalidNumber` for non-finite input, `OutOfRange` outside `[-90, 90]`
pub fn assert_latitude(value: f64) -> Result<f64> {
    assert_finite("latitude", value)?;
    if is_valid_latitude(value) {
        Ok(value)
    } else {
        Err(CoordinateError::OutOfRange {
            quantity: "latitude",
            value,
            expected: "[-90, 90]",
        })
    }
}

/// Fails with `InvalidNumber` for non-finite input, `OutOfRange` outside `[-180, 180]`
pub fn assert_longitude(value: f64) -> Result<f64> {
    assert_finite("longitude", value)?;
    if is_valid_longitude(value) {
        Ok(value)
    } else {
        Err(CoordinateError::OutOfRange {
            quantity: "longitude",
            value,
            expected: "[-180, 180]",
        })
    }
}

/// Fails with `InvalidNumber` for non-finite input, `OutOfRange` unless `value > 0`
pub fn assert_radius(value: f64) -> Result<f64> {
    assert_finite("radius", value)?;
    if is_valid_radius(value) {
        Ok(value)
    } else {
        Err(CoordinateError::OutOfRange {
            quantity: "radius",
            value,
            expected: "(0, inf)",
        })
    }
}

/// Unwraps a required coordinate, failing with `NullCoordinate` when absent
///
/// `context` names the operation that required it and ends up in the error
/// message.
pub fn assert_not_null<T>(context: &'static str, coordinate: Option<T>) -> Result<T> {
    coordinate.ok_or(CoordinateError::NullCoordinate { context })
}
