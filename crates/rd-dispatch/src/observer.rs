//! Engine observer trait for logging, metrics, and replay capture.

use rd_core::{DriverId, NodeId, TripId};

use crate::{Driver, DriverStatus, Trip, TripState};

/// Callbacks invoked by [`DispatchEngine`][crate::DispatchEngine] after each
/// state change has been applied.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers run while the engine is borrowed
/// mutably (and, behind [`SharedDispatch`][crate::SharedDispatch], while its
/// lock is held), so keep them short.
///
/// # Example: trip counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Completed(usize);
///
/// impl DispatchObserver for Completed {
///     fn on_trip_transition(&mut self, _trip: TripId, _from: TripState, to: TripState) {
///         if to == TripState::Completed {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait DispatchObserver {
    fn on_driver_registered(&mut self, _driver: &Driver) {}

    /// Called with the record just taken out of the engine.
    fn on_driver_removed(&mut self, _driver: &Driver) {}

    /// Only fired when the status actually changes.
    fn on_driver_status(&mut self, _driver: DriverId, _from: DriverStatus, _to: DriverStatus) {}

    /// The driver dropped a rider off and now stands at `to`.
    fn on_driver_moved(&mut self, _driver: DriverId, _from: NodeId, _to: NodeId) {}

    /// A new trip was stored in `REQUESTED`.
    fn on_trip_opened(&mut self, _trip: &Trip) {}

    fn on_trip_transition(&mut self, _trip: TripId, _from: TripState, _to: TripState) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
