//! Distance and equality between coordinates
//!
//! Both operands are projected onto Cartesian space first; there is no
//! great-circle shortcut for spheric pairs. Arguments are `Option`s because
//! collaborators may hold an absent "where": a missing operand is reported
//! as `NullCoordinate` instead of being treated as the origin.

use crate::constants::EPSILON;
use crate::coordinates::{Coordinate, CoordinateSystem};
use crate::errors::Result;
use crate::validation::{assert_finite, assert_not_null};

/// Euclidean distance between the Cartesian projections of `a` and `b`
///
/// # Examples
///
/// ```rust
/// use geolocus::{metric, CoordinateRegistry};
///
/// let registry = CoordinateRegistry::new();
/// let a = registry.cartesian_instance(45.0, 60.0, 50.0).unwrap();
/// let b = registry.cartesian_instance(20.5, 20.4, 20.3).unwrap();
///
/// let d = metric::distance(Some(&*a), Some(&*b)).unwrap();
/// assert!((d - 55.231).abs() < 1e-3);
///
/// assert!(metric::distance(Some(&*a), None).is_err());
/// ```
pub fn distance(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Result<f64> {
    let a = assert_not_null("distance: first operand", a)?;
    let b = assert_not_null("distance: second operand", b)?;

    let d = a.distance_to(b)?;

    assert_finite("distance", d)
}

/// Tolerance-based equality of `a` and `b`
///
/// Returns `true` straight away when both refer to the same instance,
/// otherwise compares the Cartesian projections axis by axis against
/// [`EPSILON`]. The relation is symmetric but not transitive.
pub fn is_equal(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Result<bool> {
    let a = assert_not_null("is_equal: first operand", a)?;
    let b = assert_not_null("is_equal: second operand", b)?;

    if std::ptr::eq(a, b) {
        return Ok(true);
    }

    let this = a.as_cartesian()?;
    let that = b.as_cartesian()?;
    Ok(this.within_tolerance(&that, EPSILON))
}

/// Signed per-axis differences `a - b` of the Cartesian projections
pub fn axis_distances(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Result<(f64, f64, f64)> {
    let a = assert_not_null("axis_distances: first operand", a)?.as_cartesian()?;
    let b = assert_not_null("axis_distances: second operand", b)?.as_cartesian()?;

    Ok((a.x_distance(&b)?, a.y_distance(&b)?, a.z_distance(&b)?))
}
