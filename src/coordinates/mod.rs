//! Coordinate variants and the conversion capability they share
//!
//! [`Coordinate`] is a closed sum over the two supported representations.
//! Both variants implement [`CoordinateSystem`], which converts to either
//! representation; distance and equality are always evaluated on the
//! Cartesian projection, so one algorithm serves every variant pair.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::constants::EPSILON;
use crate::errors::Result;

pub mod cartesian;
pub mod spheric;

pub use cartesian::CartesianCoordinate;
pub use spheric::SphericCoordinate;

/// Shared, read-only handle to an interned coordinate
///
/// Two handles obtained from the same registry for the same location and
/// variant point at the same allocation (`Arc::ptr_eq`).
pub type CoordinateRef = Arc<Coordinate>;

/// Discriminant of a coordinate representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CoordinateKind {
    Cartesian,
    Spheric,
}

impl fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateKind::Cartesian => f.write_str("cartesian"),
            CoordinateKind::Spheric => f.write_str("spheric"),
        }
    }
}

/// Conversion between coordinate representations
///
/// Every conversion re-validates its derived values, so a NaN produced by
/// floating point arithmetic surfaces as `InvalidNumber` instead of being
/// propagated or clamped.
pub trait CoordinateSystem {
    fn kind(&self) -> CoordinateKind;

    /// Canonical Cartesian projection
    fn as_cartesian(&self) -> Result<CartesianCoordinate>;

    /// Spheric form of the same location
    fn as_spheric(&self) -> Result<SphericCoordinate>;

    /// Euclidean distance between the Cartesian projections
    fn distance_to<C: CoordinateSystem + ?Sized>(&self, other: &C) -> Result<f64> {
        let this = self.as_cartesian()?;
        let that = other.as_cartesian()?;
        this.euclidean_distance(&that)
    }

    /// True iff the projections differ by less than [`EPSILON`] on every axis
    fn is_equal_to<C: CoordinateSystem + ?Sized>(&self, other: &C) -> Result<bool> {
        let this = self.as_cartesian()?;
        let that = other.as_cartesian()?;
        Ok(this.within_tolerance(&that, EPSILON))
    }
}

/// A location in one of the supported representations
///
/// Shared, deduplicated values come from
/// [`CoordinateRegistry`](crate::registry::CoordinateRegistry) as
/// [`CoordinateRef`]. A `Coordinate` built directly from a variant (via
/// `From`) is validated the same way but is a plain value: it is not interned,
/// and two such values are never the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Coordinate {
    Cartesian(CartesianCoordinate),
    Spheric(SphericCoordinate),
}

impl CoordinateSystem for Coordinate {
    fn kind(&self) -> CoordinateKind {
        match self {
            Coordinate::Cartesian(c) => c.kind(),
            Coordinate::Spheric(s) => s.kind(),
        }
    }

    fn as_cartesian(&self) -> Result<CartesianCoordinate> {
        match self {
            Coordinate::Cartesian(c) => c.as_cartesian(),
            Coordinate::Spheric(s) => s.as_cartesian(),
        }
    }

    fn as_spheric(&self) -> Result<SphericCoordinate> {
        match self {
            Coordinate::Cartesian(c) => c.as_spheric(),
            Coordinate::Spheric(s) => s.as_spheric(),
        }
    }
}

impl From<CartesianCoordinate> for Coordinate {
    fn from(value: CartesianCoordinate) -> Self {
        Coordinate::Cartesian(value)
    }
}

impl From<SphericCoordinate> for Coordinate {
    fn from(value: SphericCoordinate) -> Self {
        Coordinate::Spheric(value)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Cartesian(c) => c.fmt(f),
            Coordinate::Spheric(s) => s.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kind_dispatch() {
        let cartesian: Coordinate = CartesianCoordinate::origin().into();
        let spheric: Coordinate = SphericCoordinate::default().into();

        assert_eq!(cartesian.kind(), CoordinateKind::Cartesian);
        assert_eq!(spheric.kind(), CoordinateKind::Spheric);
        assert_eq!(spheric.kind().to_string(), "spheric");
    }

    #[test]
    fn test_cross_variant_distance_and_equality() {
        let spheric: Coordinate = SphericCoordinate::new(0.0, 0.0, 6371.0).unwrap().into();
        let cartesian: Coordinate = CartesianCoordinate::new(0.0, 0.0, 6371.0).unwrap().into();

        assert_abs_diff_eq!(spheric.distance_to(&cartesian).unwrap(), 0.0, epsilon = 1e-9);
        assert!(spheric.is_equal_to(&cartesian).unwrap());
        assert!(cartesian.is_equal_to(&spheric).unwrap());
    }

    #[test]
    fn test_variant_structs_share_the_trait() {
        let s = SphericCoordinate::new(0.0, 50.0, 6371.0).unwrap();
        let c = CartesianCoordinate::new(0.0, 0.0, 6371.0).unwrap();

        // Latitude 0 sits on the +z axis whatever the longitude
        assert_abs_diff_eq!(c.distance_to(&s).unwrap(), 0.0, epsilon = 1e-9);
        assert!(s.is_equal_to(&c).unwrap());
    }

    #[test]
    fn test_as_spheric_from_cartesian_variant() {
        let coord: Coordinate = CartesianCoordinate::new(0.0, 3.0, 0.0).unwrap().into();
        let spheric = coord.as_spheric().unwrap();

        assert_abs_diff_eq!(spheric.latitude(), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spheric.longitude(), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spheric.radius(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plain_values_are_not_interned() {
        let registry = crate::registry::CoordinateRegistry::new();
        let interned = registry.cartesian_instance(1.0, 2.0, 3.0).unwrap();
        let plain: Coordinate = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap().into();

        assert_eq!(registry.len(), 1);
        assert!(!std::ptr::eq(&*interned, &plain));
        assert!(crate::metric::is_equal(Some(&*interned), Some(&plain)).unwrap());
    }

    #[test]
    fn test_serialize_tagged() {
        let coord: Coordinate = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap().into();
        let json = serde_json::to_value(coord).unwrap();

        assert_eq!(json["kind"], "cartesian");
        assert_eq!(json["x"], 1.0);
        assert_eq!(json["z"], 3.0);
    }
}
