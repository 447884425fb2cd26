//! Thread-safe handle around a [`DispatchEngine`].

use std::sync::Arc;

use parking_lot::Mutex;

use rd_core::{DriverId, NodeId, TripId};
use rd_network::{HeapDijkstra, PathFinder};

use crate::{DispatchEngine, DispatchResult, DispatchStatus, Driver, Rider, Trip};

/// Cloneable, `Send + Sync` handle to one engine.
///
/// Every call takes the engine lock for its whole duration, so
/// [`request_trip`](Self::request_trip) and [`dispatch`](Self::dispatch)
/// choose and claim a driver atomically: two concurrent requests can never
/// both see the same driver as available.
///
/// Lock order is engine first, then the network's read lock.  Code that
/// writes to the network must not hold this handle's lock.
pub struct SharedDispatch<P: PathFinder = HeapDijkstra> {
    inner: Arc<Mutex<DispatchEngine<P>>>,
}

impl<P: PathFinder> Clone for SharedDispatch<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<P: PathFinder> SharedDispatch<P> {
    pub fn new(engine: DispatchEngine<P>) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut DispatchEngine<P>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn register_driver(&self, driver: Driver) -> DispatchResult<()> {
        self.inner.lock().register_driver(driver)
    }

    pub fn remove_driver(&self, id: DriverId) -> DispatchResult<Driver> {
        self.inner.lock().remove_driver(id)
    }

    /// See [`DispatchEngine::request_trip`].  Returns a snapshot of the trip.
    pub fn request_trip(&self, rider: Rider) -> DispatchResult<Trip> {
        self.inner.lock().request_trip(rider).cloned()
    }

    pub fn open_trip(&self, rider: Rider) -> DispatchResult<TripId> {
        self.inner.lock().open_trip(rider)
    }

    pub fn dispatch(&self, trip: TripId) -> DispatchResult<Option<DriverId>> {
        self.inner.lock().dispatch(trip)
    }

    pub fn find_best_driver(&self, pickup: NodeId) -> Option<DriverId> {
        self.inner.lock().find_best_driver(pickup)
    }

    pub fn start_trip(&self, trip: TripId) -> DispatchResult<()> {
        self.inner.lock().start_trip(trip)
    }

    pub fn complete_trip(&self, trip: TripId) -> DispatchResult<()> {
        self.inner.lock().complete_trip(trip)
    }

    pub fn cancel_trip(&self, trip: TripId) -> DispatchResult<()> {
        self.inner.lock().cancel_trip(trip)
    }

    pub fn trip(&self, id: TripId) -> Option<Trip> {
        self.inner.lock().trip(id).cloned()
    }

    pub fn driver(&self, id: DriverId) -> Option<Driver> {
        self.inner.lock().driver(id).cloned()
    }

    pub fn status(&self) -> DispatchStatus {
        self.inner.lock().status()
    }
}
