//! Dispatch-subsystem error types.

use thiserror::Error;

use rd_core::{CoreError, DriverId, NodeId, RiderId, TripId};
use rd_network::NetworkError;

use crate::{DriverStatus, TripState};

/// Trip state-machine violations.  The trip is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TripError {
    #[error("trip {trip}: transition {from} -> {to} is not allowed")]
    InvalidTransition { trip: TripId, from: TripState, to: TripState },

    #[error("trip {trip}: operation requires state {expected}, trip is {state}")]
    InvalidState { trip: TripId, state: TripState, expected: TripState },

    #[error("trip {trip}: distance must be positive")]
    ZeroDistance { trip: TripId },
}

/// Errors produced by the dispatch engine.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("trip {0} not found")]
    TripNotFound(TripId),

    #[error("driver {0} not found")]
    DriverNotFound(DriverId),

    #[error("rider {0} not found")]
    RiderNotFound(RiderId),

    #[error("no route from {pickup} to {dropoff}")]
    NoRoute { pickup: NodeId, dropoff: NodeId },

    #[error("cannot assign driver {driver} to trip {trip}: {reason}")]
    InvalidAssignment { trip: TripId, driver: DriverId, reason: &'static str },

    #[error("driver {0} is already registered")]
    DuplicateDriver(DriverId),

    #[error("driver {driver} is {status}")]
    DriverBusy { driver: DriverId, status: DriverStatus },

    #[error("rider {0} already has an active trip")]
    RiderBusy(RiderId),

    /// Every trip id from `first_trip_id` up to `u32::MAX` has been handed out.
    #[error("trip ids exhausted")]
    TripIdsExhausted,

    #[error("trip {0} already exists")]
    DuplicateTrip(TripId),

    #[error(transparent)]
    Trip(#[from] TripError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
