//! The `Registry`: every driver, rider, and trip the engine knows about.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use rd_core::{DriverId, RiderId, TripId};

use crate::{Driver, Rider, Trip};

/// Owns all entity records.  Records move in on registration and are
/// addressed by id from then on; nothing outside the engine holds a mutable
/// reference to them.
///
/// Drivers and riders are keyed in hash maps.  Trips sit in a `BTreeMap` so
/// iteration follows creation order (trip ids only increase).
///
/// `assignments` maps each registered driver to the trip it is serving.  A
/// trip changes its driver's record only while this entry points back at it.
#[derive(Default, Debug)]
pub struct Registry {
    pub(crate) drivers:     FxHashMap<DriverId, Driver>,
    pub(crate) riders:      FxHashMap<RiderId, Rider>,
    pub(crate) trips:       BTreeMap<TripId, Trip>,
    pub(crate) assignments: FxHashMap<DriverId, TripId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(&id)
    }

    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.riders.get(&id)
    }

    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.get(&id)
    }

    /// Trip the driver is currently serving.
    pub fn serving_trip(&self, driver: DriverId) -> Option<TripId> {
        self.assignments.get(&driver).copied()
    }

    /// `driver`, if it is registered and serving `trip`.
    pub(crate) fn serving_driver_mut(
        &mut self,
        driver: Option<DriverId>,
        trip:   TripId,
    ) -> Option<&mut Driver> {
        let id = driver?;
        if self.assignments.get(&id) != Some(&trip) {
            return None;
        }
        self.drivers.get_mut(&id)
    }

    /// Like [`serving_driver_mut`](Self::serving_driver_mut), and ends the
    /// assignment.
    pub(crate) fn release_driver(
        &mut self,
        driver: Option<DriverId>,
        trip:   TripId,
    ) -> Option<&mut Driver> {
        let id = driver?;
        if self.assignments.get(&id) != Some(&trip) {
            return None;
        }
        self.assignments.remove(&id);
        self.drivers.get_mut(&id)
    }

    /// All drivers in arbitrary order.
    pub fn drivers(&self) -> impl Iterator<Item = &Driver> + '_ {
        self.drivers.values()
    }

    pub fn riders(&self) -> impl Iterator<Item = &Rider> + '_ {
        self.riders.values()
    }

    /// All trips, oldest first.
    pub fn trips(&self) -> impl Iterator<Item = &Trip> + '_ {
        self.trips.values()
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }
}
