//! Spheric coordinates: latitude and longitude in degrees plus a radius
//!
//! The projection onto Cartesian space measures latitude from the +z axis:
//!
//! ```text
//! x = r · cos(λ) · sin(φ)
//! y = r · sin(λ) · sin(φ)
//! z = r · cos(φ)
//! ```
//!
//! so `(0, 0, r)` lies on the +z axis and every valid value projects to
//! `z >= 0`. `(φ, λ)` and `(-φ, λ ± 180)` describe the same point.

use std::fmt;

use serde::Serialize;

use super::cartesian::CartesianCoordinate;
use super::{CoordinateKind, CoordinateSystem};
use crate::constants::EARTH_MEAN_RADIUS_KM;
use crate::errors::Result;
use crate::validation::{assert_finite, assert_latitude, assert_longitude, assert_radius};

/// Location given by latitude, longitude (degrees) and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SphericCoordinate {
    latitude: f64,
    longitude: f64,
    radius: f64,
}

impl SphericCoordinate {
    /// Creates a validated spheric value
    ///
    /// Latitude must lie in `[-90, 90]`, longitude in `[-180, 180]` and the
    /// radius must be positive, otherwise `OutOfRange`; non-finite input is
    /// `InvalidNumber`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geolocus::coordinates::spheric::SphericCoordinate;
    ///
    /// let coord = SphericCoordinate::new(48.1, 11.6, 6371.0).unwrap();
    /// assert_eq!(coord.latitude(), 48.1);
    /// assert!(SphericCoordinate::new(91.0, 0.0, 6371.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64, radius: f64) -> Result<Self> {
        let coord = SphericCoordinate {
            latitude: assert_latitude(latitude)?,
            longitude: assert_longitude(longitude)?,
            radius: assert_radius(radius)?,
        };
        coord.assert_class_invariants()?;
        Ok(coord)
    }

    /// A location on the mean Earth sphere (radius 6371 km)
    pub fn on_earth(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, EARTH_MEAN_RADIUS_KM)
    }

    /// Latitude in degrees, `[-90, 90]`
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, `[-180, 180]`
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Distance from the origin, always positive
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Absolute latitude difference in degrees
    pub fn latitude_distance(&self, other: &SphericCoordinate) -> f64 {
        (self.latitude - other.latitude).abs()
    }

    /// Absolute longitude difference in degrees, without wrap-around
    pub fn longitude_distance(&self, other: &SphericCoordinate) -> f64 {
        (self.longitude - other.longitude).abs()
    }

    fn assert_class_invariants(&self) -> Result<()> {
        assert_latitude(self.latitude)?;
        assert_longitude(self.longitude)?;
        assert_radius(self.radius)?;
        Ok(())
    }
}

impl Default for SphericCoordinate {
    /// Latitude 0, longitude 0 on the mean Earth sphere
    fn default() -> Self {
        SphericCoordinate {
            latitude: 0.0,
            longitude: 0.0,
            radius: EARTH_MEAN_RADIUS_KM,
        }
    }
}

impl CoordinateSystem for SphericCoordinate {
    fn kind(&self) -> CoordinateKind {
        CoordinateKind::Spheric
    }

    fn as_cartesian(&self) -> Result<CartesianCoordinate> {
        self.assert_class_invariants()?;

        let latitude = self.latitude.to_radians();
        let longitude = self.longitude.to_radians();

        let x = assert_finite("x", self.radius * longitude.cos() * latitude.sin())?;
        let y = assert_finite("y", self.radius * longitude.sin() * latitude.sin())?;
        let z = assert_finite("z", self.radius * latitude.cos())?;

        CartesianCoordinate::new(x, y, z)
    }

    fn as_spheric(&self) -> Result<SphericCoordinate> {
        Ok(*self)
    }
}

impl fmt::Display for SphericCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Spheric(lat {}°, lon {}°, r {})",
            self.latitude, self.longitude, self.radius
        )
    }
}
