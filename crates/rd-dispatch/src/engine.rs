//! The dispatch engine: request → score → assign → start → complete/cancel.
//!
//! # Dispatch
//!
//! A request is handled in two halves:
//!
//! 1. [`DispatchEngine::open_trip`] checks that pickup and dropoff are
//!    connected and stores a `REQUESTED` trip.
//! 2. [`DispatchEngine::dispatch`] picks the best available driver, assigns
//!    and starts the trip.  With no driver free the trip simply stays
//!    `REQUESTED`.
//!
//! [`DispatchEngine::request_trip`] runs both in one call.
//!
//! # Scoring
//!
//! ```text
//! score = distance(driver.location, pickup) + zone_adjustment
//! ```
//!
//! `zone_adjustment` is `same_zone_bonus` when the driver's zone equals the
//! pickup node's zone and `cross_zone_penalty` otherwise.  Drivers that
//! cannot reach the pickup are not candidates.  Lowest score wins; equal
//! scores go to the lowest `DriverId`.
//!
//! Roads are undirected, so all candidate distances come from a single
//! shortest-path run rooted at the pickup.
//!
//! # Concurrency
//!
//! The engine itself is single-threaded (`&mut self` for every mutation).
//! Wrap it in [`SharedDispatch`][crate::SharedDispatch] to make find-best +
//! assign atomic across threads.

use std::fmt;

use tracing::{debug, trace, warn};

use rd_core::{DispatchConfig, DriverId, NodeId, RiderId, TripId, ZoneId};
use rd_network::{HeapDijkstra, PathFinder, SharedNetwork, ShortestPaths};

use crate::{
    DispatchError, DispatchObserver, DispatchResult, Driver, DriverStatus, Registry, Rider, Trip,
    TripError, TripState,
};

// ── DispatchStatus ────────────────────────────────────────────────────────────

/// Point-in-time counters.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchStatus {
    pub total_drivers:     usize,
    pub available_drivers: usize,
    pub total_trips:       usize,
    /// Trips not yet completed or cancelled.
    pub active_trips:      usize,
    /// `None` once the id range is used up.
    pub next_trip_id:      Option<TripId>,
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "drivers {}/{} available, trips {} active of {}",
            self.available_drivers,
            self.total_drivers,
            self.active_trips,
            self.total_trips,
        )?;
        match self.next_trip_id {
            Some(id) => write!(f, ", next {id}"),
            None => f.write_str(", trip ids exhausted"),
        }
    }
}

// ── DispatchEngine ────────────────────────────────────────────────────────────

/// Matches riders to drivers over a shared road network.
///
/// Owns the [`Registry`] of drivers, riders, and trips.  Drivers and riders
/// move in on registration; [`remove_driver`](Self::remove_driver) hands a
/// driver record back.
pub struct DispatchEngine<P: PathFinder = HeapDijkstra> {
    config:       DispatchConfig,
    network:      SharedNetwork,
    finder:       P,
    pub(crate) registry: Registry,
    next_trip_id: Option<TripId>,
    observers:    Vec<Box<dyn DispatchObserver + Send>>,
}

impl DispatchEngine<HeapDijkstra> {
    /// Engine using the default heap-based Dijkstra.
    ///
    /// # Errors
    ///
    /// `Config` if `config` fails [`DispatchConfig::validate`].
    pub fn new(network: SharedNetwork, config: DispatchConfig) -> DispatchResult<Self> {
        Self::with_path_finder(network, config, HeapDijkstra)
    }
}

impl<P: PathFinder> DispatchEngine<P> {
    pub fn with_path_finder(
        network: SharedNetwork,
        config:  DispatchConfig,
        finder:  P,
    ) -> DispatchResult<Self> {
        config.validate()?;
        let next_trip_id = Some(config.first_trip_id);
        Ok(Self {
            config,
            network,
            finder,
            registry: Registry::new(),
            next_trip_id,
            observers: Vec::new(),
        })
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn network(&self) -> &SharedNetwork {
        &self.network
    }

    pub fn path_finder(&self) -> &P {
        &self.finder
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Add an observer.  Observers are called in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn DispatchObserver + Send>) {
        self.observers.push(observer);
    }

    fn emit(&mut self, mut event: impl FnMut(&mut dyn DispatchObserver)) {
        for obs in &mut self.observers {
            event(obs.as_mut());
        }
    }

    // ── Drivers ───────────────────────────────────────────────────────────

    pub fn register_driver(&mut self, driver: Driver) -> DispatchResult<()> {
        let id = driver.id;
        if self.registry.drivers.contains_key(&id) {
            warn!(driver = %id, "duplicate driver registration rejected");
            return Err(DispatchError::DuplicateDriver(id));
        }
        debug!(
            driver   = %id,
            location = %driver.location,
            zone     = %driver.zone,
            status   = %driver.status,
            "driver registered"
        );
        self.registry.drivers.insert(id, driver);
        if let Some(driver) = self.registry.drivers.get(&id) {
            for obs in &mut self.observers {
                obs.on_driver_registered(driver);
            }
        }
        Ok(())
    }

    /// Take a driver out of the engine and return its record.
    ///
    /// A trip the driver was serving keeps its `driver` id but no longer
    /// owns the driver: finishing it later leaves alone any driver that is
    /// registered again under the same id.
    pub fn remove_driver(&mut self, id: DriverId) -> DispatchResult<Driver> {
        let Some(driver) = self.registry.drivers.remove(&id) else {
            warn!(driver = %id, "remove of unknown driver rejected");
            return Err(DispatchError::DriverNotFound(id));
        };
        let serving = self.registry.assignments.remove(&id);
        debug!(driver = %id, status = %driver.status, trip = ?serving, "driver removed");
        self.emit(|o| o.on_driver_removed(&driver));
        Ok(driver)
    }

    /// `AVAILABLE -> OFFLINE`.
    pub fn set_driver_offline(&mut self, id: DriverId) -> DispatchResult<()> {
        self.toggle_driver(id, DriverStatus::Available, DriverStatus::Offline)
    }

    /// `OFFLINE -> AVAILABLE`.
    pub fn set_driver_available(&mut self, id: DriverId) -> DispatchResult<()> {
        self.toggle_driver(id, DriverStatus::Offline, DriverStatus::Available)
    }

    fn toggle_driver(
        &mut self,
        id:   DriverId,
        from: DriverStatus,
        to:   DriverStatus,
    ) -> DispatchResult<()> {
        let driver = self
            .registry
            .drivers
            .get_mut(&id)
            .ok_or(DispatchError::DriverNotFound(id))?;
        if driver.status != from {
            warn!(driver = %id, status = %driver.status, wanted = %to, "driver status change rejected");
            return Err(DispatchError::DriverBusy { driver: id, status: driver.status });
        }
        driver.set_status(to);
        debug!(driver = %id, %from, %to, "driver status changed");
        self.emit(|o| o.on_driver_status(id, from, to));
        Ok(())
    }

    // ── Riders ────────────────────────────────────────────────────────────

    /// Register a rider, or refresh an idle rider's pickup/dropoff.
    ///
    /// # Errors
    ///
    /// `RiderBusy` if the rider is registered with a trip in progress.
    pub fn register_rider(&mut self, mut rider: Rider) -> DispatchResult<()> {
        self.check_rider_idle(rider.id)?;
        rider.set_active_trip(false);
        debug!(rider = %rider.id, pickup = %rider.pickup, dropoff = %rider.dropoff, "rider registered");
        self.registry.riders.insert(rider.id, rider);
        Ok(())
    }

    fn check_rider_idle(&self, id: RiderId) -> DispatchResult<()> {
        match self.registry.riders.get(&id) {
            Some(existing) => existing.validate_request().inspect_err(|_| {
                warn!(rider = %id, "request rejected: rider already has an active trip");
            }),
            None => Ok(()),
        }
    }

    // ── Trips ─────────────────────────────────────────────────────────────

    /// Open a trip for `rider` and immediately try to dispatch it.
    ///
    /// Returns the stored trip: `ONGOING` if a driver was found, otherwise
    /// still `REQUESTED`.
    ///
    /// # Errors
    ///
    /// Everything [`open_trip`](Self::open_trip) can return; no trip is
    /// created in that case.
    pub fn request_trip(&mut self, rider: Rider) -> DispatchResult<&Trip> {
        let id = self.open_trip(rider)?;
        self.dispatch(id)?;
        self.registry.trips.get(&id).ok_or(DispatchError::TripNotFound(id))
    }

    /// Check feasibility and store a new `REQUESTED` trip.
    ///
    /// The rider is registered (or its locations refreshed) and marked as
    /// having an active trip.  Trip ids start at
    /// `DispatchConfig::first_trip_id` and increase by one per opened trip.
    ///
    /// # Errors
    ///
    /// - `RiderBusy` if the rider already has a trip in progress.
    /// - `NoRoute` if pickup and dropoff are not connected (or either node
    ///   does not exist).
    /// - `TripIdsExhausted` once the id after `u32::MAX` would be needed.
    /// - `DuplicateTrip` if the next id is already taken.
    ///
    /// Nothing is stored on error.
    pub fn open_trip(&mut self, mut rider: Rider) -> DispatchResult<TripId> {
        self.check_rider_idle(rider.id)?;

        let Some(id) = self.next_trip_id else {
            warn!(rider = %rider.id, "request rejected: trip ids exhausted");
            return Err(DispatchError::TripIdsExhausted);
        };
        if self.registry.trips.contains_key(&id) {
            warn!(rider = %rider.id, trip = %id, "request rejected: trip id in use");
            return Err(DispatchError::DuplicateTrip(id));
        }

        let (pickup, dropoff) = (rider.pickup, rider.dropoff);
        let distance = {
            let network = self.network.read();
            self.finder.distance_between(&network, pickup, dropoff)
        };
        let Some(distance) = distance.value() else {
            warn!(rider = %rider.id, %pickup, %dropoff, "request rejected: no route");
            return Err(DispatchError::NoRoute { pickup, dropoff });
        };

        self.next_trip_id = id.next();
        let trip = Trip::new(id, rider.id, pickup, dropoff, distance, self.config.tariff);
        debug!(
            trip     = %id,
            rider    = %rider.id,
            %pickup,
            %dropoff,
            distance = trip.distance(),
            fare     = trip.fare(),
            "trip opened"
        );

        rider.set_active_trip(true);
        self.registry.riders.insert(rider.id, rider);
        self.registry.trips.insert(id, trip);
        if let Some(trip) = self.registry.trips.get(&id) {
            for obs in &mut self.observers {
                obs.on_trip_opened(trip);
            }
        }
        Ok(id)
    }

    /// Assign and start the best available driver for a `REQUESTED` trip.
    ///
    /// Returns the chosen driver, or `None` (trip left `REQUESTED`) when no
    /// available driver can reach the pickup.
    pub fn dispatch(&mut self, trip_id: TripId) -> DispatchResult<Option<DriverId>> {
        let trip = self
            .registry
            .trips
            .get(&trip_id)
            .ok_or(DispatchError::TripNotFound(trip_id))?;
        if trip.state() != TripState::Requested {
            return Err(TripError::InvalidState {
                trip:     trip_id,
                state:    trip.state(),
                expected: TripState::Requested,
            }
            .into());
        }

        let pickup = trip.pickup();
        let Some(driver) = self.find_best_driver(pickup) else {
            debug!(trip = %trip_id, %pickup, "no driver available; trip stays requested");
            return Ok(None);
        };
        self.assign_driver_to_trip(trip_id, driver)?;
        self.start_trip(trip_id)?;
        Ok(Some(driver))
    }

    /// Best available driver for a pickup at `pickup`, if any can reach it.
    pub fn find_best_driver(&self, pickup: NodeId) -> Option<DriverId> {
        let network = self.network.read();
        let paths = self.finder.shortest_paths(&network, pickup).ok()?;
        let pickup_zone = network.zone(pickup);

        self.registry
            .drivers
            .values()
            .filter(|d| d.is_available())
            .filter_map(|d| {
                let score = self.score_with(&paths, pickup_zone, d)?;
                trace!(driver = %d.id, %pickup, score, "candidate scored");
                Some((score, d.id))
            })
            .min()
            .map(|(_, id)| id)
    }

    /// Dispatch score of `driver` for a pickup at `pickup`, regardless of
    /// the driver's status.  `None` if the driver is unknown or cannot reach
    /// the pickup.
    pub fn score_driver(&self, driver: DriverId, pickup: NodeId) -> Option<i64> {
        let driver = self.registry.drivers.get(&driver)?;
        let network = self.network.read();
        let paths = self.finder.shortest_paths(&network, pickup).ok()?;
        self.score_with(&paths, network.zone(pickup), driver)
    }

    fn score_with(
        &self,
        paths:       &ShortestPaths,
        pickup_zone: Option<ZoneId>,
        driver:      &Driver,
    ) -> Option<i64> {
        let distance = paths.distance_to(driver.location).value()?;
        let distance = i64::try_from(distance).unwrap_or(i64::MAX);
        let same_zone = pickup_zone == Some(driver.zone);
        Some(distance.saturating_add(self.config.zone_adjustment(same_zone)))
    }

    /// Pair an available driver with a `REQUESTED` trip.  Both move to
    /// `ASSIGNED`.
    ///
    /// # Errors
    ///
    /// - `InvalidAssignment` if the driver or trip is missing, or the driver
    ///   is not `AVAILABLE`.
    /// - `Trip(InvalidState)` if the trip is past `REQUESTED`.
    pub fn assign_driver_to_trip(&mut self, trip_id: TripId, driver_id: DriverId) -> DispatchResult<()> {
        let invalid = |reason: &'static str| {
            warn!(trip = %trip_id, driver = %driver_id, reason, "assignment rejected");
            DispatchError::InvalidAssignment { trip: trip_id, driver: driver_id, reason }
        };

        let Some(driver) = self.registry.drivers.get_mut(&driver_id) else {
            return Err(invalid("driver not registered"));
        };
        if !driver.is_available() {
            return Err(invalid("driver not available"));
        }
        let Some(trip) = self.registry.trips.get_mut(&trip_id) else {
            return Err(invalid("trip not found"));
        };

        trip.assign_driver(driver_id)?;
        let previous = driver.set_status(DriverStatus::Assigned);
        self.registry.assignments.insert(driver_id, trip_id);
        debug!(trip = %trip_id, driver = %driver_id, "driver assigned");

        self.emit(|o| {
            o.on_trip_transition(trip_id, TripState::Requested, TripState::Assigned);
            o.on_driver_status(driver_id, previous, DriverStatus::Assigned);
        });
        Ok(())
    }

    /// `ASSIGNED -> ONGOING`; the driver goes `ON_TRIP`.
    pub fn start_trip(&mut self, trip_id: TripId) -> DispatchResult<()> {
        let trip = self
            .registry
            .trips
            .get_mut(&trip_id)
            .ok_or(DispatchError::TripNotFound(trip_id))?;
        trip.start()
            .inspect_err(|e| warn!(trip = %trip_id, error = %e, "start rejected"))?;

        let assigned = trip.driver();
        let driver = self
            .registry
            .serving_driver_mut(assigned, trip_id)
            .map(|d| (d.id, d.set_status(DriverStatus::OnTrip)));
        debug!(trip = %trip_id, "trip started");

        self.emit(|o| {
            o.on_trip_transition(trip_id, TripState::Assigned, TripState::Ongoing);
            if let Some((id, from)) = driver {
                if from != DriverStatus::OnTrip {
                    o.on_driver_status(id, from, DriverStatus::OnTrip);
                }
            }
        });
        Ok(())
    }

    /// `ONGOING -> COMPLETED`.  The driver moves to the dropoff and becomes
    /// `AVAILABLE`; the rider is free to request again.
    ///
    /// The driver keeps its registered zone.  Only the driver still serving
    /// this trip is touched; see [`remove_driver`](Self::remove_driver).
    pub fn complete_trip(&mut self, trip_id: TripId) -> DispatchResult<()> {
        let trip = self
            .registry
            .trips
            .get_mut(&trip_id)
            .ok_or(DispatchError::TripNotFound(trip_id))?;
        trip.complete()
            .inspect_err(|e| warn!(trip = %trip_id, error = %e, "complete rejected"))?;

        let dropoff = trip.dropoff();
        let rider_id = trip.rider();
        let assigned = trip.driver();
        let driver = self
            .registry
            .release_driver(assigned, trip_id)
            .map(|d| (d.id, d.move_to(dropoff), d.set_status(DriverStatus::Available)));
        if let Some(rider) = self.registry.riders.get_mut(&rider_id) {
            rider.set_active_trip(false);
        }
        debug!(trip = %trip_id, %dropoff, "trip completed");

        self.emit(|o| {
            o.on_trip_transition(trip_id, TripState::Ongoing, TripState::Completed);
            if let Some((id, from_node, from_status)) = driver {
                if from_node != dropoff {
                    o.on_driver_moved(id, from_node, dropoff);
                }
                if from_status != DriverStatus::Available {
                    o.on_driver_status(id, from_status, DriverStatus::Available);
                }
            }
        });
        Ok(())
    }

    /// Cancel a trip from any non-terminal state.  An assigned driver is
    /// released to `AVAILABLE` where it stands; the rider is freed.
    pub fn cancel_trip(&mut self, trip_id: TripId) -> DispatchResult<()> {
        let trip = self
            .registry
            .trips
            .get_mut(&trip_id)
            .ok_or(DispatchError::TripNotFound(trip_id))?;
        let from = trip
            .cancel()
            .inspect_err(|e| warn!(trip = %trip_id, error = %e, "cancel rejected"))?;

        let rider_id = trip.rider();
        let assigned = trip.driver();
        let driver = self
            .registry
            .release_driver(assigned, trip_id)
            .map(|d| (d.id, d.set_status(DriverStatus::Available)));
        if let Some(rider) = self.registry.riders.get_mut(&rider_id) {
            rider.set_active_trip(false);
        }
        debug!(trip = %trip_id, %from, "trip cancelled");

        self.emit(|o| {
            o.on_trip_transition(trip_id, from, TripState::Cancelled);
            if let Some((id, status)) = driver {
                if status != DriverStatus::Available {
                    o.on_driver_status(id, status, DriverStatus::Available);
                }
            }
        });
        Ok(())
    }

    /// Shortest pickup-to-dropoff path for a stored trip on the current
    /// network.
    pub fn trip_route(&self, trip_id: TripId) -> DispatchResult<Vec<NodeId>> {
        let trip = self
            .registry
            .trips
            .get(&trip_id)
            .ok_or(DispatchError::TripNotFound(trip_id))?;
        let network = self.network.read();
        let paths = self.finder.shortest_paths(&network, trip.pickup())?;
        Ok(paths.path_to(trip.dropoff())?)
    }

    /// The rider's unfinished trip, if any.
    pub fn active_trip_of(&self, rider: RiderId) -> DispatchResult<Option<&Trip>> {
        if !self.registry.riders.contains_key(&rider) {
            return Err(DispatchError::RiderNotFound(rider));
        }
        Ok(self
            .registry
            .trips
            .values()
            .rev()
            .find(|t| t.rider() == rider && t.state().is_active()))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.registry.driver(id)
    }

    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.registry.rider(id)
    }

    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.registry.trip(id)
    }

    pub fn driver_count(&self) -> usize {
        self.registry.driver_count()
    }

    pub fn available_driver_count(&self) -> usize {
        self.available_drivers().count()
    }

    pub fn rider_count(&self) -> usize {
        self.registry.rider_count()
    }

    pub fn trip_count(&self) -> usize {
        self.registry.trip_count()
    }

    pub fn active_trip_count(&self) -> usize {
        self.active_trips().count()
    }

    /// Id the next opened trip will receive; `None` once ids are exhausted.
    pub fn next_trip_id(&self) -> Option<TripId> {
        self.next_trip_id
    }

    pub fn available_drivers(&self) -> impl Iterator<Item = &Driver> + '_ {
        self.registry.drivers().filter(|d| d.is_available())
    }

    /// Unfinished trips, oldest first.
    pub fn active_trips(&self) -> impl Iterator<Item = &Trip> + '_ {
        self.registry.trips().filter(|t| t.state().is_active())
    }

    pub fn status(&self) -> DispatchStatus {
        DispatchStatus {
            total_drivers:     self.driver_count(),
            available_drivers: self.available_driver_count(),
            total_trips:       self.trip_count(),
            active_trips:      self.active_trip_count(),
            next_trip_id:      self.next_trip_id,
        }
    }
}
