//! Trip record and its state machine.
//!
//! ```text
//! REQUESTED ──► ASSIGNED ──► ONGOING ──► COMPLETED
//!     │             │            │
//!     └─────────────┴────────────┴──────► CANCELLED
//! ```
//!
//! `COMPLETED` and `CANCELLED` are terminal.  Every mutation goes through
//! [`Trip::transition_to`], so an illegal move is rejected and leaves the trip
//! untouched.

use std::fmt;

use rd_core::{DriverId, NodeId, RiderId, Tariff, TripId};

use crate::TripError;

// ── TripState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TripState {
    Requested,
    Assigned,
    Ongoing,
    Completed,
    Cancelled,
}

impl TripState {
    /// Whether the state machine allows `self -> next`.
    pub fn can_transition_to(self, next: TripState) -> bool {
        use TripState::*;
        matches!(
            (self, next),
            (Requested, Assigned)
                | (Requested, Cancelled)
                | (Assigned, Ongoing)
                | (Assigned, Cancelled)
                | (Ongoing, Completed)
                | (Ongoing, Cancelled)
        )
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, TripState::Completed | TripState::Cancelled)
    }

    /// Not yet finished: requested, assigned, or ongoing.
    #[inline]
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TripState::Requested => "REQUESTED",
            TripState::Assigned  => "ASSIGNED",
            TripState::Ongoing   => "ONGOING",
            TripState::Completed => "COMPLETED",
            TripState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TripState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Trip ──────────────────────────────────────────────────────────────────────

/// One ride from `pickup` to `dropoff`.
///
/// `fare` always equals `tariff.fare(distance)`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    id:       TripId,
    rider:    RiderId,
    driver:   Option<DriverId>,
    pickup:   NodeId,
    dropoff:  NodeId,
    distance: u64,
    fare:     f64,
    state:    TripState,
    tariff:   Tariff,
}

impl Trip {
    /// A new trip in `REQUESTED` with no driver.
    ///
    /// A zero `distance` (pickup equals dropoff) is billed as 1 unit.
    pub fn new(
        id:       TripId,
        rider:    RiderId,
        pickup:   NodeId,
        dropoff:  NodeId,
        distance: u64,
        tariff:   Tariff,
    ) -> Self {
        let distance = distance.max(1);
        Self {
            id,
            rider,
            driver: None,
            pickup,
            dropoff,
            distance,
            fare: tariff.fare(distance),
            state: TripState::Requested,
            tariff,
        }
    }

    pub fn id(&self) -> TripId { self.id }
    pub fn rider(&self) -> RiderId { self.rider }
    pub fn driver(&self) -> Option<DriverId> { self.driver }
    pub fn pickup(&self) -> NodeId { self.pickup }
    pub fn dropoff(&self) -> NodeId { self.dropoff }
    pub fn distance(&self) -> u64 { self.distance }
    pub fn fare(&self) -> f64 { self.fare }
    pub fn state(&self) -> TripState { self.state }
    pub fn tariff(&self) -> &Tariff { &self.tariff }

    /// Replace the billed distance and recompute the fare.
    ///
    /// Unlike [`Trip::new`] this does not clamp: a zero distance is rejected
    /// and the trip keeps its current distance and fare.
    pub fn set_distance(&mut self, distance: u64) -> Result<(), TripError> {
        if distance == 0 {
            return Err(TripError::ZeroDistance { trip: self.id });
        }
        self.distance = distance;
        self.fare = self.tariff.fare(distance);
        Ok(())
    }

    /// Move to `next` if allowed.  Returns the previous state.
    pub fn transition_to(&mut self, next: TripState) -> Result<TripState, TripError> {
        if !self.state.can_transition_to(next) {
            return Err(TripError::InvalidTransition { trip: self.id, from: self.state, to: next });
        }
        Ok(std::mem::replace(&mut self.state, next))
    }

    /// `REQUESTED -> ASSIGNED`, recording `driver`.
    pub fn assign_driver(&mut self, driver: DriverId) -> Result<(), TripError> {
        self.require(TripState::Requested)?;
        self.transition_to(TripState::Assigned)?;
        self.driver = Some(driver);
        Ok(())
    }

    /// `ASSIGNED -> ONGOING`.
    pub fn start(&mut self) -> Result<(), TripError> {
        self.require(TripState::Assigned)?;
        self.transition_to(TripState::Ongoing).map(drop)
    }

    /// `ONGOING -> COMPLETED`.
    pub fn complete(&mut self) -> Result<(), TripError> {
        self.require(TripState::Ongoing)?;
        self.transition_to(TripState::Completed).map(drop)
    }

    /// Any non-terminal state `-> CANCELLED`.  Returns the state cancelled
    /// from.
    pub fn cancel(&mut self) -> Result<TripState, TripError> {
        self.transition_to(TripState::Cancelled)
    }

    fn require(&self, expected: TripState) -> Result<(), TripError> {
        if self.state != expected {
            return Err(TripError::InvalidState { trip: self.id, state: self.state, expected });
        }
        Ok(())
    }
}
