//! # Coordinate Registry
//!
//! Interning store for coordinate values. Every acquisition resolves the
//! requested location to its Cartesian projection and returns the value
//! already registered for that location and variant, so collaborators that
//! ask for the same place share one immutable allocation.
//!
//! ## Layout
//!
//! Entries live in a [`DashMap`] of grid cells. Under
//! [`KeyStrategy::Tolerance`] the cell pitch is twice the tolerance, so a
//! point within the tolerance of another is always in the same or an
//! adjacent cell and a lookup inspects at most 27 cells. Under
//! [`KeyStrategy::Grid`] the pitch is the tolerance itself and a lookup
//! inspects exactly one cell.
//!
//! ## Locking
//!
//! Cache hits only take the map's per-shard read locks. Under
//! [`KeyStrategy::Tolerance`] a miss takes a single registry-wide mutex,
//! probes again and inserts, so concurrent callers racing for a new location
//! end up with one entry. [`KeyStrategy::Grid`] resolves the race through
//! the map's entry API on the target cell instead.
//!
//! The registry is append-only; entries live as long as the registry does.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use geolocus::CoordinateRegistry;
//!
//! let registry = CoordinateRegistry::new();
//! let a = registry.spheric_instance(48.1, 11.6, 6371.0).unwrap();
//! let b = registry.spheric_instance(48.1, 11.6, 6371.0).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use lazy_static::lazy_static;
use log::{debug, trace};
use serde::Serialize;

use crate::constants::EARTH_MEAN_RADIUS_KM;
use crate::coordinates::{
    CartesianCoordinate, Coordinate, CoordinateKind, CoordinateRef, CoordinateSystem,
    SphericCoordinate,
};
use crate::errors::{CoordinateError, Result};

pub mod config;

pub use config::{KeyStrategy, RegistryConfig};

lazy_static! {
    static ref DEFAULT_REGISTRY: CoordinateRegistry = CoordinateRegistry::new();
}

/// The process-wide registry behind the crate-level acquisition functions
pub fn default_registry() -> &'static CoordinateRegistry {
    &DEFAULT_REGISTRY
}

type CellKey = (i64, i64, i64);

#[derive(Debug)]
struct Entry {
    /// Insertion order, used to pick the earliest of several matches
    seq: u64,
    projection: CartesianCoordinate,
    value: CoordinateRef,
}

/// Interning store for coordinate values
#[derive(Debug)]
pub struct CoordinateRegistry {
    cells: DashMap<CellKey, Vec<Entry>>,
    insert_lock: Mutex<()>,
    next_seq: AtomicU64,
    config: RegistryConfig,
}

impl CoordinateRegistry {
    /// Creates an empty registry with the default configuration
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Creates an empty registry, rejecting an invalid configuration
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Creating coordinate registry: tolerance {}, {:?} keys",
            config.tolerance, config.key_strategy
        );
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        Self {
            cells: DashMap::new(),
            insert_lock: Mutex::new(()),
            next_seq: AtomicU64::new(0),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Interned Cartesian coordinate at `(x, y, z)`
    pub fn cartesian_instance(&self, x: f64, y: f64, z: f64) -> Result<CoordinateRef> {
        let requested = CartesianCoordinate::new(x, y, z)
            .map_err(|err| rejected(CoordinateKind::Cartesian, err))?;
        self.acquire(Coordinate::Cartesian(requested), requested)
    }

    /// Interned Cartesian origin
    pub fn default_cartesian_instance(&self) -> Result<CoordinateRef> {
        self.cartesian_instance(0.0, 0.0, 0.0)
    }

    /// Interned spheric coordinate
    ///
    /// Range violations fail with `OutOfRange` before the registry is
    /// consulted, so an invalid request can never alias a cached value.
    pub fn spheric_instance(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<CoordinateRef> {
        let requested = SphericCoordinate::new(latitude, longitude, radius)
            .map_err(|err| rejected(CoordinateKind::Spheric, err))?;
        let projection = requested
            .as_cartesian()
            .map_err(|err| rejected(CoordinateKind::Spheric, err))?;
        self.acquire(Coordinate::Spheric(requested), projection)
    }

    /// Interned spheric coordinate on the mean Earth sphere
    pub fn spheric_instance_on_earth(&self, latitude: f64, longitude: f64) -> Result<CoordinateRef> {
        self.spheric_instance(latitude, longitude, EARTH_MEAN_RADIUS_KM)
    }

    /// Interned spheric coordinate at latitude 0, longitude 0, radius 6371
    pub fn default_spheric_instance(&self) -> Result<CoordinateRef> {
        self.spheric_instance(0.0, 0.0, EARTH_MEAN_RADIUS_KM)
    }

    /// Cartesian coordinate equal to `coordinate` except for `x`
    ///
    /// The receiver is never modified; the result comes from the same
    /// acquisition path as [`cartesian_instance`](Self::cartesian_instance).
    pub fn with_x(&self, coordinate: &Coordinate, x: f64) -> Result<CoordinateRef> {
        let c = coordinate
            .as_cartesian()
            .map_err(|err| rejected(CoordinateKind::Cartesian, err))?;
        self.cartesian_instance(x, c.y(), c.z())
    }

    /// Cartesian coordinate equal to `coordinate` except for `y`
    pub fn with_y(&self, coordinate: &Coordinate, y: f64) -> Result<CoordinateRef> {
        let c = coordinate
            .as_cartesian()
            .map_err(|err| rejected(CoordinateKind::Cartesian, err))?;
        self.cartesian_instance(c.x(), y, c.z())
    }

    /// Cartesian coordinate equal to `coordinate` except for `z`
    pub fn with_z(&self, coordinate: &Coordinate, z: f64) -> Result<CoordinateRef> {
        let c = coordinate
            .as_cartesian()
            .map_err(|err| rejected(CoordinateKind::Cartesian, err))?;
        self.cartesian_instance(c.x(), c.y(), z)
    }

    /// Spheric coordinate equal to `coordinate` except for the latitude
    ///
    /// Cartesian receivers are converted first and fail where they have no
    /// spheric form (origin, `z < 0`).
    pub fn with_latitude(&self, coordinate: &Coordinate, latitude: f64) -> Result<CoordinateRef> {
        let s = coordinate
            .as_spheric()
            .map_err(|err| rejected(CoordinateKind::Spheric, err))?;
        self.spheric_instance(latitude, s.longitude(), s.radius())
    }

    /// Spheric coordinate equal to `coordinate` except for the longitude
    pub fn with_longitude(&self, coordinate: &Coordinate, longitude: f64) -> Result<CoordinateRef> {
        let s = coordinate
            .as_spheric()
            .map_err(|err| rejected(CoordinateKind::Spheric, err))?;
        self.spheric_instance(s.latitude(), longitude, s.radius())
    }

    /// Spheric coordinate equal to `coordinate` except for the radius
    pub fn with_radius(&self, coordinate: &Coordinate, radius: f64) -> Result<CoordinateRef> {
        let s = coordinate
            .as_spheric()
            .map_err(|err| rejected(CoordinateKind::Spheric, err))?;
        self.spheric_instance(s.latitude(), s.longitude(), radius)
    }

    /// Number of interned values
    pub fn len(&self) -> usize {
        self.cells.iter().map(|cell| cell.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the registry contents
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            entries: 0,
            cartesian: 0,
            spheric: 0,
            cells: self.cells.len(),
            tolerance: self.config.tolerance,
            key_strategy: self.config.key_strategy,
        };

        for cell in self.cells.iter() {
            for entry in cell.value() {
                stats.entries += 1;
                match entry.value.kind() {
                    CoordinateKind::Cartesian => stats.cartesian += 1,
                    CoordinateKind::Spheric => stats.spheric += 1,
                }
            }
        }

        stats
    }

    fn acquire(&self, candidate: Coordinate, projection: CartesianCoordinate) -> Result<CoordinateRef> {
        match self.config.key_strategy {
            KeyStrategy::Tolerance => self.acquire_within_tolerance(candidate, projection),
            KeyStrategy::Grid => self.acquire_on_grid(candidate, projection),
        }
    }

    fn acquire_within_tolerance(
        &self,
        candidate: Coordinate,
        projection: CartesianCoordinate,
    ) -> Result<CoordinateRef> {
        let kind = candidate.kind();

        if let Some(found) = self.probe_neighbourhood(kind, &projection) {
            trace!("Registry hit for {} at {}", kind, projection);
            return Ok(found);
        }

        let _guard = self.insert_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Another thread may have inserted it while we waited for the lock
        if let Some(found) = self.probe_neighbourhood(kind, &projection) {
            trace!("Registry hit after lock for {} at {}", kind, projection);
            return Ok(found);
        }

        let value = Arc::new(candidate);
        let key = self.neighbourhood_cell(&projection);
        self.cells
            .entry(key)
            .or_default()
            .push(self.new_entry(projection, Arc::clone(&value)));

        debug!("Interned {} (cell {:?})", value, key);
        Ok(value)
    }

    fn acquire_on_grid(
        &self,
        candidate: Coordinate,
        projection: CartesianCoordinate,
    ) -> Result<CoordinateRef> {
        let kind = candidate.kind();
        let key = self.grid_cell(&projection);

        if let Some(cell) = self.cells.get(&key) {
            if let Some(found) = find_kind(&cell, kind) {
                trace!("Registry hit for {} in cell {:?}", kind, key);
                return Ok(found);
            }
        }

        // The entry guard holds the shard write lock until it is dropped
        let mut cell = self.cells.entry(key).or_default();
        if let Some(found) = find_kind(&cell, kind) {
            return Ok(found);
        }

        let value = Arc::new(candidate);
        cell.push(self.new_entry(projection, Arc::clone(&value)));

        debug!("Interned {} (cell {:?})", value, key);
        Ok(value)
    }

    /// Earliest inserted entry of `kind` within tolerance of `projection`
    fn probe_neighbourhood(
        &self,
        kind: CoordinateKind,
        projection: &CartesianCoordinate,
    ) -> Option<CoordinateRef> {
        let (cx, cy, cz) = self.neighbourhood_cell(projection);
        let mut best: Option<(u64, CoordinateRef)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(cell) = self.cells.get(&key) else {
                        continue;
                    };

                    for entry in cell.iter() {
                        if entry.value.kind() != kind
                            || !entry.projection.within_tolerance(projection, self.config.tolerance)
                        {
                            continue;
                        }
                        if best.as_ref().map_or(true, |(seq, _)| entry.seq < *seq) {
                            best = Some((entry.seq, Arc::clone(&entry.value)));
                        }
                    }
                }
            }
        }

        best.map(|(_, value)| value)
    }

    fn neighbourhood_cell(&self, projection: &CartesianCoordinate) -> CellKey {
        cell_of(projection, 2.0 * self.config.tolerance, f64::floor)
    }

    fn grid_cell(&self, projection: &CartesianCoordinate) -> CellKey {
        cell_of(projection, self.config.tolerance, f64::round)
    }

    fn new_entry(&self, projection: CartesianCoordinate, value: CoordinateRef) -> Entry {
        Entry {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            projection,
            value,
        }
    }
}

impl Default for CoordinateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_of(projection: &CartesianCoordinate, pitch: f64, snap: fn(f64) -> f64) -> CellKey {
    // `as` saturates, so far-out coordinates share the boundary cells
    let index = |v: f64| snap(v / pitch) as i64;
    (index(projection.x()), index(projection.y()), index(projection.z()))
}

fn find_kind(entries: &[Entry], kind: CoordinateKind) -> Option<CoordinateRef> {
    entries
        .iter()
        .find(|entry| entry.value.kind() == kind)
        .map(|entry| Arc::clone(&entry.value))
}

fn rejected(kind: CoordinateKind, err: CoordinateError) -> CoordinateError {
    debug!("Rejected {} coordinate: {}", kind, err);
    err
}

/// Registry statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryStats {
    /// Total number of interned values
    pub entries: usize,
    /// Interned Cartesian values
    pub cartesian: usize,
    /// Interned spheric values
    pub spheric: usize,
    /// Occupied grid cells
    pub cells: usize,
    /// Per-axis tolerance the registry matches with
    pub tolerance: f64,
    /// How projections are mapped to cells
    pub key_strategy: KeyStrategy,
}
