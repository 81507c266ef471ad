//! Geolocus: interned location values in Cartesian and spheric coordinates
//!
//! This crate provides immutable coordinate values, conversion between the
//! two representations, Euclidean distance and tolerance-based equality, and
//! a registry that hands out one shared instance per distinct location.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! let here = geolocus::spheric_instance(0.0, 0.0, 6371.0).unwrap();
//! let there = geolocus::cartesian_instance(0.0, 0.0, 6371.0).unwrap();
//!
//! assert!(geolocus::is_equal(Some(&*here), Some(&*there)).unwrap());
//! assert!(geolocus::distance(Some(&*here), Some(&*there)).unwrap() < 1e-9);
//!
//! let again = geolocus::spheric_instance(0.0, 0.0, 6371.0).unwrap();
//! assert!(Arc::ptr_eq(&here, &again));
//! ```

pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod metric;
pub mod registry;
pub mod validation;

// Re-export commonly used types
pub use coordinates::{
    CartesianCoordinate, Coordinate, CoordinateKind, CoordinateRef, CoordinateSystem,
    SphericCoordinate,
};
pub use errors::{CoordinateError, Result};
pub use metric::{distance, is_equal};
pub use registry::{default_registry, CoordinateRegistry, KeyStrategy, RegistryConfig};

/// Interned Cartesian coordinate from the process-wide registry
pub fn cartesian_instance(x: f64, y: f64, z: f64) -> Result<CoordinateRef> {
    default_registry().cartesian_instance(x, y, z)
}

/// Interned Cartesian origin from the process-wide registry
pub fn default_cartesian_instance() -> Result<CoordinateRef> {
    default_registry().default_cartesian_instance()
}

/// Interned spheric coordinate from the process-wide registry
pub fn spheric_instance(latitude: f64, longitude: f64, radius: f64) -> Result<CoordinateRef> {
    default_registry().spheric_instance(latitude, longitude, radius)
}

/// Interned spheric coordinate on the mean Earth sphere from the process-wide registry
pub fn spheric_instance_on_earth(latitude: f64, longitude: f64) -> Result<CoordinateRef> {
    default_registry().spheric_instance_on_earth(latitude, longitude)
}

/// Interned spheric coordinate (0, 0, 6371) from the process-wide registry
pub fn default_spheric_instance() -> Result<CoordinateRef> {
    default_registry().default_spheric_instance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_crate_level_entry_points() {
        let origin = default_cartesian_instance().unwrap();
        assert!(Arc::ptr_eq(&origin, &cartesian_instance(0.0, 0.0, 0.0).unwrap()));

        let surface = default_spheric_instance().unwrap();
        assert!(Arc::ptr_eq(&surface, &spheric_instance_on_earth(0.0, 0.0).unwrap()));
        assert!(Arc::ptr_eq(&surface, &spheric_instance(0.0, 0.0, 6371.0).unwrap()));

        assert!(spheric_instance(91.0, 0.0, 6371.0).unwrap_err().is_out_of_range());
    }
}
