//! # Cartesian Coordinate Module
//!
//! `CartesianCoordinate` is the canonical projection of every location in
//! this crate. Spheric values are converted into it before they are compared,
//! measured or looked up in the registry, so it is the one frame in which
//! distance and tolerance are defined.
//!
//! ## Invariants
//!
//! - All three components are finite
//! - Components are private and never change after construction
//!
//! ## Examples
//!
//! ```rust
//! use geolocus::coordinates::cartesian::CartesianCoordinate;
//!
//! let a = CartesianCoordinate::new(45.0, 60.0, 50.0).unwrap();
//! let b = CartesianCoordinate::new(20.5, 20.4, 20.3).unwrap();
//!
//! let distance = a.euclidean_distance(&b).unwrap();
//! assert!((distance - 55.231).abs() < 1e-3);
//! ```

use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;

use super::spheric::SphericCoordinate;
use super::{CoordinateKind, CoordinateSystem};
use crate::errors::Result;
use crate::validation::assert_finite;

/// Three-dimensional Cartesian location
///
/// Units follow whatever the caller uses for spheric radii (kilometers for
/// Earth locations).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartesianCoordinate {
    x: f64,
    y: f64,
    z: f64,
}

impl CartesianCoordinate {
    /// Creates a validated Cartesian value
    ///
    /// Fails with `InvalidNumber` if any component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::coordinates::cartesian::CartesianCoordinate;
    ///
    /// let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
    /// assert_eq!(coord.x(), 1.0);
    /// assert!(CartesianCoordinate::new(f64::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        let coord = CartesianCoordinate {
            x: assert_finite("x", x)?,
            y: assert_finite("y", y)?,
            z: assert_finite("z", z)?,
        };
        coord.assert_class_invariants()?;
        Ok(coord)
    }

    /// The origin `(0, 0, 0)`
    pub fn origin() -> Self {
        CartesianCoordinate {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// X component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Components as an `(x, y, z)` tuple
    pub fn components(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Distance from the origin, `sqrt(x² + y² + z²)`
    ///
    /// Computed with `hypot`, so the squares never overflow or underflow.
    /// The result is only infinite when the true length exceeds `f64::MAX`.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Signed difference `self.x - other.x`
    pub fn x_distance(&self, other: &CartesianCoordinate) -> Result<f64> {
        assert_finite("x distance", self.x - other.x)
    }

    /// Signed difference `self.y - other.y`
    pub fn y_distance(&self, other: &CartesianCoordinate) -> Result<f64> {
        assert_finite("y distance", self.y - other.y)
    }

    /// Signed difference `self.z - other.z`
    pub fn z_distance(&self, other: &CartesianCoordinate) -> Result<f64> {
        assert_finite("z distance", self.z - other.z)
    }

    /// Straight-line distance to another Cartesian value
    ///
    /// `d = sqrt((ax-bx)² + (ay-by)² + (az-bz)²)`
    pub fn euclidean_distance(&self, other: &CartesianCoordinate) -> Result<f64> {
        self.assert_class_invariants()?;
        other.assert_class_invariants()?;

        let distance = self
            .x_distance(other)?
            .hypot(self.y_distance(other)?)
            .hypot(self.z_distance(other)?);

        assert_finite("distance", distance)
    }

    /// True iff every axis differs by strictly less than `tolerance`
    pub fn within_tolerance(&self, other: &CartesianCoordinate, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.z - other.z).abs() < tolerance
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3, validating every component
    pub fn from_vector3(vec: Vector3<f64>) -> Result<Self> {
        CartesianCoordinate::new(vec.x, vec.y, vec.z)
    }

    fn assert_class_invariants(&self) -> Result<()> {
        assert_finite("x", self.x)?;
        assert_finite("y", self.y)?;
        assert_finite("z", self.z)?;
        Ok(())
    }
}

impl Default for CartesianCoordinate {
    fn default() -> Self {
        Self::origin()
    }
}

impl CoordinateSystem for CartesianCoordinate {
    fn kind(&self) -> CoordinateKind {
        CoordinateKind::Cartesian
    }

    fn as_cartesian(&self) -> Result<CartesianCoordinate> {
        Ok(*self)
    }

    /// Converts to spheric form
    ///
    /// `r = |v|`, `latitude = acos(z / r)`, `longitude = atan2(y, x)`, both in
    /// degrees. The origin yields NaN and fails with `InvalidNumber`; points
    /// with `z < 0` map to a latitude above 90 and fail with `OutOfRange`.
    fn as_spheric(&self) -> Result<SphericCoordinate> {
        self.assert_class_invariants()?;

        let radius = assert_finite("radius", self.magnitude())?;
        let latitude = assert_finite("latitude", (self.z / radius).acos().to_degrees())?;
        let longitude = assert_finite("longitude", self.y.atan2(self.x).to_degrees())?;

        SphericCoordinate::new(latitude, longitude, radius)
    }
}

impl fmt::Display for CartesianCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cartesian({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_cartesian_creation() {
        let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!(coord.x(), 1.0);
        assert_eq!(coord.y(), 2.0);
        assert_eq!(coord.z(), 3.0);
        assert_eq!(coord.components(), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rejects_non_finite_components() {
        assert!(CartesianCoordinate::new(f64::NAN, 0.0, 0.0)
            .unwrap_err()
            .is_invalid_number());
        assert!(CartesianCoordinate::new(0.0, f64::INFINITY, 0.0)
            .unwrap_err()
            .is_invalid_number());
        assert!(CartesianCoordinate::new(0.0, 0.0, f64::NEG_INFINITY)
            .unwrap_err()
            .is_invalid_number());
    }

    #[test]
    fn test_default_is_origin() {
        let origin = CartesianCoordinate::default();
        assert_eq!(origin.components(), (0.0, 0.0, 0.0));
        assert_eq!(origin.magnitude(), 0.0);
    }

    #[test]
    fn test_magnitude_calculation() {
        let coord = CartesianCoordinate::new(3.0, 4.0, 0.0).unwrap();
        assert_eq!(coord.magnitude(), 5.0);
    }

    #[test]
    fn test_axis_distances() {
        let a = CartesianCoordinate::new(45.0, 60.0, 50.0).unwrap();
        let b = CartesianCoordinate::new(20.5, 20.4, 20.3).unwrap();

        assert_abs_diff_eq!(a.x_distance(&b).unwrap(), 24.5, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y_distance(&b).unwrap(), 39.6, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z_distance(&b).unwrap(), 29.7, epsilon = 1e-9);

        // Signed, so swapping operands flips the sign
        assert_abs_diff_eq!(b.x_distance(&a).unwrap(), -24.5, epsilon = 1e-9);
    }

    #[test]
    fn test_axis_distance_overflow_is_invalid() {
        let a = CartesianCoordinate::new(f64::MAX, 0.0, 0.0).unwrap();
        let b = CartesianCoordinate::new(-f64::MAX, 0.0, 0.0).unwrap();
        assert!(a.x_distance(&b).unwrap_err().is_invalid_number());
        assert!(a.euclidean_distance(&b).unwrap_err().is_invalid_number());
    }

    #[test]
    fn test_extreme_magnitudes_do_not_overflow() {
        let far = CartesianCoordinate::new(1e200, 0.0, 0.0).unwrap();
        assert_eq!(far.magnitude(), 1e200);
        assert_eq!(far.euclidean_distance(&CartesianCoordinate::origin()).unwrap(), 1e200);

        let tiny = CartesianCoordinate::new(3e-200, 4e-200, 0.0).unwrap();
        assert_relative_eq!(tiny.magnitude(), 5e-200, max_relative = 1e-12);
        assert_relative_eq!(
            tiny.euclidean_distance(&CartesianCoordinate::origin()).unwrap(),
            5e-200,
            max_relative = 1e-12
        );

        let spheric = far.as_spheric().unwrap();
        assert_eq!(spheric.radius(), 1e200);
        assert_abs_diff_eq!(spheric.latitude(), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_euclidean_distance() {
        let a = CartesianCoordinate::new(45.0, 60.0, 50.0).unwrap();
        let b = CartesianCoordinate::new(20.5, 20.4, 20.3).unwrap();

        assert_abs_diff_eq!(a.euclidean_distance(&b).unwrap(), 55.23133169, epsilon = 1e-3);
        assert_eq!(a.euclidean_distance(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_within_tolerance_is_strict() {
        let a = CartesianCoordinate::new(1.0, 1.0, 1.0).unwrap();
        let near = CartesianCoordinate::new(1.009, 0.991, 1.0).unwrap();
        let far = CartesianCoordinate::new(1.0, 1.0, 1.02).unwrap();

        assert!(a.within_tolerance(&near, 0.01));
        assert!(!a.within_tolerance(&far, 0.01));
        assert!(!a.within_tolerance(&a, 0.0));
    }

    #[test]
    fn test_to_spheric_on_axes() {
        let north = CartesianCoordinate::new(0.0, 0.0, 6371.0).unwrap();
        let spheric = north.as_spheric().unwrap();
        assert_eq!(spheric.latitude(), 0.0);
        assert_eq!(spheric.longitude(), 0.0);
        assert_eq!(spheric.radius(), 6371.0);

        let equator = CartesianCoordinate::new(-10.0, 0.0, 0.0).unwrap();
        let spheric = equator.as_spheric().unwrap();
        assert_abs_diff_eq!(spheric.latitude(), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spheric.longitude(), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spheric.radius(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_spheric_failures() {
        // r = 0 gives acos(0 / 0) = NaN
        let err = CartesianCoordinate::origin().as_spheric().unwrap_err();
        assert!(err.is_invalid_number());

        // Negative z has no representation with latitude in [-90, 90]
        let south = CartesianCoordinate::new(0.0, 0.0, -1.0).unwrap();
        assert!(south.as_spheric().unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_vector3_conversions() {
        let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
        let vec = coord.to_vector3();
        assert_eq!(vec, Vector3::new(1.0, 2.0, 3.0));

        let back = CartesianCoordinate::from_vector3(vec).unwrap();
        assert_eq!(coord, back);

        assert!(CartesianCoordinate::from_vector3(Vector3::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_display() {
        let coord = CartesianCoordinate::new(1.5, -2.0, 0.0).unwrap();
        assert_eq!(coord.to_string(), "Cartesian(1.5, -2, 0)");
    }
}
