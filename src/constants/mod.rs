//! Constants module for coordinate calculations

// Earth model
/// Mean Earth radius in kilometers (perfect sphere)
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

// Tolerances
/// Per-axis tolerance below which two coordinates are considered equal
pub const EPSILON: f64 = 0.01;

// Legal domains, degrees
/// Southernmost latitude
pub const LATITUDE_MIN: f64 = -90.0;
/// Northernmost latitude
pub const LATITUDE_MAX: f64 = 90.0;
/// Westernmost longitude
pub const LONGITUDE_MIN: f64 = -180.0;
/// Easternmost longitude
pub const LONGITUDE_MAX: f64 = 180.0;
